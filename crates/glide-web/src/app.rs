//! Page-lifetime state shared by every widget binding

use std::cell::RefCell;
use std::rc::Rc;

use glide_core::frame::{FrameBatcher, FrameKey};
use glide_core::motion::MomentumScroll;
use glide_core::{AppConfig, Bootstrap, InitReport, Result};
use tracing::{debug, warn};
use web_sys::{Document, Element, Window};

use crate::dom::{self, Registry};
use crate::scheduler::{Dom, RafScheduler};
use crate::tween::{Gsap, PageTweener};
use crate::widgets;

pub struct App {
    pub config: AppConfig,
    pub window: Window,
    pub document: Document,
    pub registry: RefCell<Registry>,
    pub engine: RefCell<MomentumScroll>,
    batcher: RefCell<FrameBatcher<Dom, RafScheduler>>,
    gsap: Option<Gsap>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Rc<Self>> {
        let window = dom::window()?;
        let document = dom::document(&window)?;

        let mut engine = MomentumScroll::new(config.scroll.clone());
        let motion_query = config
            .scroll
            .respect_reduced_motion
            .then(|| dom::reduced_motion_query(&window))
            .flatten();
        if let Some(query) = &motion_query {
            engine.set_reduced_motion(query.matches());
        }

        let gsap = Gsap::detect(&window);
        debug!(gsap = gsap.is_some(), smooth = engine.is_smooth(), "Page capabilities");

        let app = Rc::new(Self {
            batcher: RefCell::new(FrameBatcher::new(RafScheduler::new(window.clone()))),
            config,
            window,
            document,
            registry: RefCell::new(Registry::default()),
            engine: RefCell::new(engine),
            gsap,
        });

        let weak = Rc::downgrade(&app);
        app.batcher.borrow().scheduler().install(move |_timestamp| {
            if let Some(app) = weak.upgrade() {
                app.run_frame();
            }
        });

        // The OS setting can flip while the page is open
        if let Some(query) = motion_query {
            let weak = Rc::downgrade(&app);
            let source = query.clone();
            let listening = dom::listen(&query, "change", move |_| {
                if let Some(app) = weak.upgrade() {
                    let reduced = source.matches();
                    app.engine.borrow_mut().set_reduced_motion(reduced);
                    debug!(reduced, "Reduced motion preference changed");
                }
            });
            if let Err(e) = listening {
                warn!(error = %e, "Cannot follow reduced motion changes");
            }
        }
        Ok(app)
    }

    /// Wire every widget; core steps first
    pub fn start(self: &Rc<Self>) -> InitReport {
        let mut boot = Bootstrap::new();
        boot.core("menu", || widgets::menu::init(self))
            .core("scroll", || widgets::scroll::init(self))
            .core("reveal", || widgets::reveal::init(self))
            .enhancement("loading", || widgets::loading::init(self))
            .enhancement("header", || widgets::header::init(self))
            .enhancement("progress", || widgets::scroll::init_progress(self))
            .enhancement("cursor", || widgets::cursor::init(self))
            .enhancement("carousel", || widgets::carousel::init(self))
            .enhancement("magnetic", || widgets::pointer::init_magnetic(self))
            .enhancement("hover-lift", || widgets::pointer::init_hover_lift(self))
            .enhancement("counter", || widgets::counter::init(self))
            .enhancement("form", || widgets::form::init(self))
            .enhancement("lazy", || widgets::lazy::init(self))
            .enhancement("parallax", || widgets::parallax::init(self));
        boot.finish()
    }

    pub fn query(&self, selector: &str) -> Result<Element> {
        dom::query(&self.document, selector)
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<Element>> {
        dom::query_all(&self.document, selector)
    }

    pub fn register(&self, element: &Element) -> Result<glide_core::ElementId> {
        self.registry.borrow_mut().register(element)
    }

    pub fn schedule<F>(&self, write: F)
    where
        F: FnOnce(&mut Dom) + 'static,
    {
        self.batcher.borrow_mut().schedule(write);
    }

    pub fn schedule_keyed<F>(&self, key: FrameKey, write: F)
    where
        F: FnOnce(&mut Dom) + 'static,
    {
        self.batcher.borrow_mut().schedule_keyed(key, write);
    }

    /// Run `f` with a tweener bound to the registry
    pub fn tween<R>(&self, f: impl FnOnce(&mut PageTweener<'_>) -> R) -> R {
        let registry = self.registry.borrow();
        let mut tweener = PageTweener::new(&registry, self.gsap.as_ref());
        f(&mut tweener)
    }

    pub fn set_timeout<F>(&self, delay_ms: u64, f: F)
    where
        F: FnOnce() + 'static,
    {
        dom::set_timeout(&self.window, delay_ms, f);
    }

    fn run_frame(&self) {
        let writes = self.batcher.borrow_mut().drain();
        let mut dom = Dom::new(self.window.clone());
        for write in writes {
            write(&mut dom);
        }
    }
}
