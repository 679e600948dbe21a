use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glide_core::frame::FrameKey;
use glide_core::visibility::VisibilityDetector;
use glide_core::widgets::counter::trigger_options;
use glide_core::widgets::Counter;
use glide_core::{ElementId, Error, Result};
use tracing::warn;
use web_sys::Element;

use crate::app::App;
use crate::observer::ObserverDetector;

type Counters = Rc<RefCell<HashMap<ElementId, (Element, Counter)>>>;

pub fn init(app: &Rc<App>) -> Result<()> {
    let elements = app.query_all("[data-count]")?;
    if elements.is_empty() {
        return Err(Error::MissingAnchor("[data-count]".to_string()));
    }

    let counters: Counters = Rc::new(RefCell::new(HashMap::new()));
    for element in elements {
        let raw = element.get_attribute("data-count").unwrap_or_default();
        match Counter::from_attribute(&raw, &app.config.counter) {
            Ok(counter) => {
                let id = app.register(&element)?;
                counters.borrow_mut().insert(id, (element, counter));
            }
            Err(e) => warn!(error = %e, "Skipping counter"),
        }
    }

    let detector = Rc::new(RefCell::new(ObserverDetector::new(Rc::clone(app))));
    let ids: Vec<ElementId> = counters.borrow().keys().copied().collect();
    if !detector.borrow().is_available() {
        for id in ids {
            queue_step(app, &counters, id);
        }
        return Ok(());
    }

    {
        let (app, counters, shared) = (Rc::clone(app), Rc::clone(&counters), Rc::clone(&detector));
        detector.borrow_mut().on_visible(move |id| {
            // One run per counter
            shared.borrow_mut().unobserve(id);
            queue_step(&app, &counters, id);
        });
    }
    let options = trigger_options(&app.config.counter);
    for id in ids {
        detector.borrow_mut().observe(id, options);
    }
    Ok(())
}

fn queue_step(app: &Rc<App>, counters: &Counters, id: ElementId) {
    let (handle, counters) = (Rc::clone(app), Rc::clone(counters));
    app.schedule_keyed(FrameKey::element("counter", id), move |dom| {
        let done = {
            let mut counters = counters.borrow_mut();
            let Some((element, counter)) = counters.get_mut(&id) else {
                return;
            };
            let frame = counter.step();
            dom.set_text(element, &frame.text);
            frame.done
        };
        if !done {
            queue_step(&handle, &counters, id);
        }
    });
}
