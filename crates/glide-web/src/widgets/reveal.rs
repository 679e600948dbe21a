use std::cell::RefCell;
use std::rc::Rc;

use glide_core::frame::FrameKey;
use glide_core::reveal::{animatable_selector, RevealOrchestrator, StyleChange};
use glide_core::Result;
use tracing::debug;

use crate::app::App;
use crate::dom;
use crate::observer::ObserverDetector;

pub fn init(app: &Rc<App>) -> Result<()> {
    let mut orchestrator = RevealOrchestrator::new(app.config.reveal.clone());
    for element in app.query_all(&animatable_selector())? {
        orchestrator.track(app.register(&element)?);
    }
    if orchestrator.is_empty() {
        debug!("No animatable elements on this page");
        return Ok(());
    }

    let orchestrator = Rc::new(RefCell::new(orchestrator));
    let detector = Rc::new(RefCell::new(ObserverDetector::new(Rc::clone(app))));
    {
        // The handler owns the detector, keeping its observers alive for the page
        let (app, orchestrator, shared) = (Rc::clone(app), Rc::clone(&orchestrator), Rc::clone(&detector));
        detector.borrow_mut().on_visible(move |id| {
            let change = orchestrator
                .borrow_mut()
                .on_visible(id, &mut *shared.borrow_mut());
            if let Some(change) = change {
                apply(&app, change);
            }
        });
    }

    let now = dom::now_ms();
    let changes = orchestrator
        .borrow_mut()
        .start(&mut *detector.borrow_mut(), now);
    for change in changes {
        apply(app, change);
    }

    let due_in = orchestrator.borrow().safety_net_due_in(now);
    if let Some(delay) = due_in {
        let (handle, orchestrator) = (Rc::clone(app), Rc::clone(&orchestrator));
        app.set_timeout(delay, move || {
            let changes = orchestrator
                .borrow_mut()
                .tick(dom::now_ms(), &mut *detector.borrow_mut());
            for change in changes {
                apply(&handle, change);
            }
        });
    }
    Ok(())
}

fn apply(app: &App, change: StyleChange) {
    let Some(element) = app.registry.borrow().get(change.id).cloned() else {
        return;
    };
    app.schedule_keyed(FrameKey::element("reveal", change.id), move |dom| {
        let style = change.style;
        dom.set_style(&element, "transition", &style.css_transition());
        dom.set_style(&element, "opacity", &style.opacity.to_string());
        dom.set_style(&element, "transform", &style.css_transform());
    });
}
