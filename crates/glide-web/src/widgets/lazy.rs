use std::cell::RefCell;
use std::rc::Rc;

use glide_core::tween::{TweenProps, Tweener};
use glide_core::widgets::lazy::LoadRequest;
use glide_core::widgets::LazyLoader;
use glide_core::{EasingType, Error, Result};

use crate::app::App;
use crate::observer::ObserverDetector;

pub fn init(app: &Rc<App>) -> Result<()> {
    let mut loader = LazyLoader::new(app.config.lazy.clone());
    for image in app.query_all("img[loading='lazy']")? {
        let id = app.register(&image)?;
        let data_src = image.get_attribute("data-src");
        let src = image.get_attribute("src");
        loader.track(id, data_src.as_deref(), src.as_deref());
    }
    if loader.pending_count() == 0 {
        return Err(Error::MissingAnchor("img[data-src]".to_string()));
    }

    let loader = Rc::new(RefCell::new(loader));
    let detector = Rc::new(RefCell::new(ObserverDetector::new(Rc::clone(app))));
    {
        let (app, loader, shared) = (Rc::clone(app), Rc::clone(&loader), Rc::clone(&detector));
        detector.borrow_mut().on_visible(move |id| {
            let request = loader.borrow_mut().on_visible(id, &mut *shared.borrow_mut());
            if let Some(request) = request {
                load(&app, request);
            }
        });
    }

    let requests = loader.borrow_mut().start(&mut *detector.borrow_mut());
    for request in requests {
        load(app, request);
    }
    Ok(())
}

fn load(app: &Rc<App>, request: LoadRequest) {
    let Some(image) = app.registry.borrow().get(request.id).cloned() else {
        return;
    };
    let id = request.id;
    let fade_ms = app.config.lazy.fade_ms;
    let handle = Rc::clone(app);
    app.schedule(move |dom| {
        dom.set_style(&image, "opacity", "0");
        dom.set_attribute(&image, "src", &request.source);
        handle.tween(|tweener| {
            tweener.animate_to(id, TweenProps::default().with_opacity(1.0), fade_ms, EasingType::Power2Out)
        });
    });
}
