//! Momentum scrolling for in-page anchors, the progress bar and back-to-top

use std::cell::RefCell;
use std::rc::Rc;

use glide_core::frame::FrameKey;
use glide_core::motion::anchor_target;
use glide_core::rate::{Debounce, Throttle};
use glide_core::widgets::{back_to_top_visible, progress_percent};
use glide_core::Result;
use tracing::debug;

use crate::app::App;
use crate::dom;

const SCROLL_KEY: FrameKey = FrameKey::channel("scroll");
const PROGRESS_KEY: FrameKey = FrameKey::channel("progress");

pub fn init(app: &Rc<App>) -> Result<()> {
    update_bounds(app);

    for anchor in app.query_all("a[href^='#']")? {
        let app = Rc::clone(app);
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            if href.len() <= 1 {
                return;
            }
            // An href that is not a valid selector is treated like a missing target
            let target = match app.query(&href) {
                Ok(target) => target,
                Err(e) => {
                    debug!(href = %href, reason = %e, "Anchor target not found");
                    return;
                }
            };
            event.prevent_default();
            let offset = anchor_target(
                dom::rect_of(&target).top,
                dom::scroll_y(&app.window),
                app.config.scroll.anchor_offset,
            );
            scroll_to(&app, offset);
        })?;
    }

    {
        let app = Rc::clone(app);
        let debounce = RefCell::new(Debounce::default());
        let window = app.window.clone();
        dom::listen(&window, "scroll", move |_| {
            if debounce.borrow_mut().call(dom::now_ms()) {
                sync_if_idle(&app);
            }
        })?;
    }

    {
        let app = Rc::clone(app);
        let throttle = Rc::new(RefCell::new(Throttle::default()));
        let window = app.window.clone();
        dom::listen(&window, "resize", move |_| {
            let now = dom::now_ms();
            let (fire, arm) = {
                let mut throttle = throttle.borrow_mut();
                let armed = throttle.has_trailing();
                let fire = throttle.call(now);
                (fire, if armed { None } else { throttle.due_in(now) })
            };
            if fire {
                update_bounds(&app);
            }
            if let Some(delay) = arm {
                let (handle, throttle) = (Rc::clone(&app), Rc::clone(&throttle));
                app.set_timeout(delay, move || {
                    if throttle.borrow_mut().flush(dom::now_ms()) {
                        update_bounds(&handle);
                    }
                });
            }
        })?;
    }
    Ok(())
}

/// Start (or retarget) a momentum scroll
///
/// Bounds are re-read first; the document grows as images and late content
/// load.
pub fn scroll_to(app: &Rc<App>, offset: f64) {
    update_bounds(app);
    sync_if_idle(app);
    app.engine.borrow_mut().scroll_to(offset);
    queue_step(app);
}

/// Pick up scrolling done by the user since the engine last moved
fn sync_if_idle(app: &App) {
    let mut engine = app.engine.borrow_mut();
    if !engine.is_converging() {
        engine.sync(dom::scroll_y(&app.window));
    }
}

fn queue_step(app: &Rc<App>) {
    let handle = Rc::clone(app);
    app.schedule_keyed(SCROLL_KEY, move |dom| {
        let (offset, converging) = {
            let mut engine = handle.engine.borrow_mut();
            let offset = engine.step();
            (offset, engine.is_converging())
        };
        dom.scroll_to(offset);
        if converging {
            queue_step(&handle);
        }
    });
}

fn update_bounds(app: &App) {
    let Some(root) = app.document.document_element() else {
        return;
    };
    let max = (root.scroll_height() - root.client_height()).max(0);
    app.engine.borrow_mut().set_bounds(max as f64);
}

pub fn init_progress(app: &Rc<App>) -> Result<()> {
    let bar = app.query(".scroll-progress").ok().map(|bar| dom::to_html(&bar)).transpose()?;
    let button = app.query(".back-to-top").ok();
    if bar.is_none() && button.is_none() {
        return Err(glide_core::Error::MissingAnchor(
            ".scroll-progress, .back-to-top".to_string(),
        ));
    }

    if let Some(button) = &button {
        let app = Rc::clone(app);
        dom::listen(button, "click", move |event| {
            event.prevent_default();
            scroll_to(&app, 0.0);
        })?;
    }

    let handle = Rc::clone(app);
    let window = app.window.clone();
    dom::listen(&window, "scroll", move |_| {
        let offset = dom::scroll_y(&handle.window);
        let Some(root) = handle.document.document_element() else {
            return;
        };
        let percent = progress_percent(
            root.scroll_top() as f64,
            root.scroll_height() as f64,
            root.client_height() as f64,
        );
        let visible = back_to_top_visible(offset, handle.config.scroll.back_to_top_threshold);
        let (bar, button) = (bar.clone(), button.clone());
        handle.schedule_keyed(PROGRESS_KEY, move |dom| {
            if let Some(bar) = &bar {
                dom.set_style(bar, "width", &format!("{percent}%"));
            }
            if let Some(button) = &button {
                dom.set_class(button, "active", visible);
            }
        });
    })?;
    Ok(())
}
