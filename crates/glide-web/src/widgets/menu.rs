use std::cell::RefCell;
use std::rc::Rc;

use glide_core::frame::FrameKey;
use glide_core::widgets::menu::{LinkAnimation, MenuTransition, MenuView};
use glide_core::widgets::MobileMenu;
use glide_core::Result;
use web_sys::{Element, HtmlElement};

use crate::app::App;
use crate::dom;

const MENU_KEY: FrameKey = FrameKey::channel("menu");

#[derive(Clone)]
struct MenuParts {
    toggle: Element,
    nav: Element,
    body: Option<HtmlElement>,
    links: Vec<HtmlElement>,
}

pub fn init(app: &Rc<App>) -> Result<()> {
    let toggle = app.query(".mobile-menu-toggle")?;
    let nav = app.query(".main-nav")?;
    let links = dom::query_all_in(&nav, "a")?
        .iter()
        .map(dom::to_html)
        .collect::<Result<Vec<_>>>()?;

    let menu = Rc::new(RefCell::new(MobileMenu::new(app.config.menu.clone(), links.len())));
    let parts = MenuParts {
        toggle: toggle.clone(),
        nav,
        body: app.document.body(),
        links,
    };

    {
        let (app, menu, parts) = (Rc::clone(app), Rc::clone(&menu), parts.clone());
        dom::listen(&toggle, "click", move |event| {
            event.prevent_default();
            let transition = menu.borrow_mut().toggle(dom::now_ms());
            apply(&app, &menu, &parts, transition);
        })?;
    }

    for link in parts.links.clone() {
        let (app, menu, parts) = (Rc::clone(app), Rc::clone(&menu), parts.clone());
        dom::listen(&link, "click", move |_| {
            if !menu.borrow().is_open() {
                return;
            }
            let transition = menu.borrow_mut().close(dom::now_ms());
            apply(&app, &menu, &parts, transition);
        })?;
    }
    Ok(())
}

fn apply(app: &Rc<App>, menu: &Rc<RefCell<MobileMenu>>, parts: &MenuParts, transition: MenuTransition) {
    write_view(app, parts, transition.view);
    for animation in transition.links {
        write_link(app, parts, animation);
    }

    let due_in = menu.borrow().removal_due_in(dom::now_ms());
    if let Some(delay) = due_in {
        let (handle, menu, parts) = (Rc::clone(app), Rc::clone(menu), parts.clone());
        app.set_timeout(delay, move || {
            let view = menu.borrow_mut().tick(dom::now_ms());
            if let Some(view) = view {
                write_view(&handle, &parts, view);
            }
        });
    }
}

fn write_view(app: &App, parts: &MenuParts, view: MenuView) {
    let parts = parts.clone();
    app.schedule_keyed(MENU_KEY, move |dom| {
        dom.set_class(&parts.toggle, "active", view.icon_active);
        dom.set_class(&parts.nav, "active", view.nav_active);
        dom.set_class(&parts.nav, "closing", view.nav_closing);
        if let Some(body) = &parts.body {
            dom.set_class(body, "menu-open", view.scroll_locked);
        }
    });
}

fn write_link(app: &App, parts: &MenuParts, animation: LinkAnimation) {
    let Some(link) = parts.links.get(animation.index).cloned() else {
        return;
    };
    app.schedule(move |dom| {
        dom.set_style(&link, "transition-delay", &format!("{}ms", animation.delay_ms));
        dom.set_style(&link, "opacity", if animation.visible { "1" } else { "0" });
        dom.set_style(
            &link,
            "transform",
            if animation.visible { "translateY(0)" } else { "translateY(20px)" },
        );
    });
}
