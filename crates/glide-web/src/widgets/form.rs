use std::cell::RefCell;
use std::rc::Rc;

use glide_core::motion::EasingType;
use glide_core::tween::{TweenProps, Tweener};
use glide_core::widgets::{Field, FormValidator, SubmitOutcome};
use glide_core::{Error, Result};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlTextAreaElement};

use crate::app::App;
use crate::dom;

const FIELDS: &str = "input, textarea";
const SHAKE_MS: u64 = 200;
const SHAKE_OFFSET: f64 = 10.0;

fn field_name(element: &Element, index: usize) -> String {
    element
        .get_attribute("name")
        .or_else(|| Some(element.id()).filter(|id| !id.is_empty()))
        .unwrap_or_else(|| format!("field-{index}"))
}

fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn init(app: &Rc<App>) -> Result<()> {
    let forms = app.query_all("form")?;
    if forms.is_empty() {
        return Err(Error::MissingAnchor("form".to_string()));
    }
    for form in forms {
        bind(app, form)?;
    }
    Ok(())
}

fn bind(app: &Rc<App>, form: Element) -> Result<()> {
    let elements = dom::query_all_in(&form, FIELDS)?;
    let names: Vec<String> = elements
        .iter()
        .enumerate()
        .map(|(index, element)| field_name(element, index))
        .collect();
    let fields = elements
        .iter()
        .zip(&names)
        .map(|(element, name)| Field::new(name.clone(), element.has_attribute("required")))
        .collect();
    let validator = Rc::new(RefCell::new(FormValidator::new(fields)));

    for (element, name) in elements.iter().zip(names.clone()) {
        let (app, validator, target) = (Rc::clone(app), Rc::clone(&validator), element.clone());
        dom::listen(element, "input", move |_| {
            let cleared = validator.borrow_mut().input(&name, field_value(&target));
            if cleared {
                let target = target.clone();
                app.schedule(move |dom| dom.set_class(&target, "error", false));
            }
        })?;
    }

    let app = Rc::clone(app);
    let message = app.config.form.success_message.clone();
    let target = form.clone();
    dom::listen(&form, "submit", move |event| {
        // Pick up values typed before the listeners were attached
        {
            let mut validator = validator.borrow_mut();
            for (element, name) in elements.iter().zip(&names) {
                validator.input(name, field_value(element));
            }
        }
        let outcome = validator.borrow_mut().submit();
        // Handled on the page; nothing is posted
        event.prevent_default();
        match outcome {
            SubmitOutcome::Blocked { errored } => {
                debug!(fields = ?errored, "Form blocked");
                let marks: Vec<(Element, bool)> = elements
                    .iter()
                    .zip(&names)
                    .map(|(element, name)| (element.clone(), errored.contains(name)))
                    .collect();
                let bad: Vec<Element> = marks
                    .iter()
                    .filter(|(_, bad)| *bad)
                    .map(|(element, _)| element.clone())
                    .collect();
                shake(&app, &bad);
                app.schedule(move |dom| {
                    for (element, bad) in &marks {
                        dom.set_class(element, "error", *bad);
                    }
                });
            }
            SubmitOutcome::Accepted => {
                let form = target.clone();
                let note = format!("<p class=\"form-success\">{}</p>", escape(&message));
                app.schedule(move |dom| {
                    dom.set_class(&form, "submitted", true);
                    form.set_inner_html(&note);
                });
            }
            SubmitOutcome::AlreadySubmitted => {}
        }
    })
}

/// Nudge errored fields sideways and back
fn shake(app: &Rc<App>, fields: &[Element]) {
    let mut ids = Vec::new();
    for field in fields {
        if let Ok(id) = app.register(field) {
            ids.push(id);
        }
    }
    app.tween(|tweener| {
        for &id in &ids {
            tweener.animate_to(id, TweenProps::translate_x(SHAKE_OFFSET), SHAKE_MS / 2, EasingType::Power1InOut);
        }
    });
    let handle = Rc::clone(app);
    app.set_timeout(SHAKE_MS / 2, move || {
        handle.tween(|tweener| {
            for &id in &ids {
                tweener.animate_to(id, TweenProps::translate_x(0.0), SHAKE_MS / 2, EasingType::Power1InOut);
            }
        });
    });
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Q&A <b>"), "Q&amp;A &lt;b&gt;");
    }
}
