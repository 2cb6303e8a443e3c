//! Portfolio FX entry point
//!
//! Wires every page feature once the document is ready. Each feature looks up its
//! own markup and quietly stays off when that markup is missing.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, Element, EventTarget, HtmlCanvasElement,
        HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
        KeyboardEvent,
    };

    use portfolio_fx::PageConfig;
    use portfolio_fx::fx::{
        Celebration, CategoryFilter, ContactForm, FormControl, FormSubmitter, FrameClock, MatrixFrame,
        MatrixRain, ModalChange, ModalController, NavMenu, RevealEffect, RevealTarget, ScrollLock,
        SecretSequence, Starfield, SubmitStatus, Theme, ThemeManager, Typewriter, parse_percent,
        watch,
    };
    use portfolio_fx::platform::web::{self, FetchTransport, IntersectionSource, LocalStore, selectors};

    /// Attach `handler` to `event` on `target` for the page's lifetime
    fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Portfolio FX starting...");
        let config = PageConfig::load();

        setup_year();
        setup_nav();
        setup_theme();
        setup_starfield(&config);
        setup_matrix_rain(&config);
        setup_typewriter(&config);
        setup_reveals(&config);
        setup_modals();
        setup_filter();
        setup_contact_form(&config);
        setup_secret_sequence(&config);

        log::info!("Portfolio FX running!");
    }

    fn setup_year() {
        if let Some(el) = web::by_id(selectors::YEAR) {
            let year = js_sys::Date::new_0().get_full_year();
            el.set_text_content(Some(&year.to_string()));
        }
    }

    fn setup_nav() {
        let (Some(toggle), Some(list)) = (
            web::by_id(selectors::NAV_TOGGLE),
            web::by_id(selectors::NAV_LINKS),
        ) else {
            log::debug!("No mobile nav markup, skipping");
            return;
        };

        let nav = Rc::new(RefCell::new(NavMenu::new()));
        let apply = {
            let toggle = toggle.clone();
            let list = list.clone();
            move |nav: &NavMenu| {
                web::set_class(&list, selectors::NAV_OPEN_CLASS, nav.is_open());
                let _ = toggle.set_attribute("aria-expanded", nav.aria_expanded());
            }
        };
        apply(&nav.borrow());

        {
            let nav = nav.clone();
            let apply = apply.clone();
            listen(&toggle, "click", move |_event| {
                let mut nav = nav.borrow_mut();
                nav.toggle();
                apply(&nav);
            });
        }

        for link in web::query_all(Some(&list), "a") {
            let nav = nav.clone();
            let apply = apply.clone();
            listen(&link, "click", move |_event| {
                let mut nav = nav.borrow_mut();
                nav.link_followed();
                apply(&nav);
            });
        }
    }

    fn apply_theme(body: &HtmlElement, theme: Theme) {
        web::set_class(body, selectors::LIGHT_MODE_CLASS, theme.is_light());
        if let Some(icon) = web::by_id(selectors::THEME_ICON) {
            icon.set_inner_html(theme.icon_svg());
        }
    }

    fn setup_theme() {
        let Some(body) = web::document().and_then(|d| d.body()) else {
            return;
        };
        let themes = ThemeManager::load(LocalStore::new());
        apply_theme(&body, themes.theme());

        let Some(toggle) = web::by_id(selectors::THEME_TOGGLE) else {
            log::debug!("No theme toggle, theme is fixed");
            return;
        };
        let themes = Rc::new(RefCell::new(themes));
        listen(&toggle, "click", move |_event| {
            let theme = themes.borrow_mut().toggle();
            apply_theme(&body, theme);
            log::info!("Theme switched to {}", theme.as_str());
        });
    }

    /// Replace the container's children with one element per sprite
    fn build_stars(container: &Element, field: &Starfield) -> Vec<Element> {
        container.set_inner_html("");
        let Some(document) = web::document() else {
            return Vec::new();
        };
        field
            .sprites()
            .iter()
            .filter_map(|sprite| {
                let star = document.create_element("div").ok()?;
                star.set_class_name("star");
                let _ = star.set_attribute(
                    "style",
                    &format!(
                        "width:{size:.1}px;height:{size:.1}px;animation-duration:{:.2}s;\
                         animation-delay:{:.2}s;transform:translate({:.1}px,{:.1}px)",
                        sprite.twinkle_duration,
                        sprite.twinkle_delay,
                        sprite.pos.x,
                        sprite.pos.y,
                        size = sprite.size,
                    ),
                );
                container.append_child(&star).ok()?;
                Some(star)
            })
            .collect()
    }

    fn setup_starfield(config: &PageConfig) {
        let Some(container) = web::by_id(selectors::STARFIELD) else {
            log::debug!("No starfield container, skipping");
            return;
        };
        let Some(window) = web::window() else {
            return;
        };

        let (w, h) = web::viewport_size();
        let field = Rc::new(RefCell::new(Starfield::new(w, h, config.star_count, web::time_seed())));
        let stars = Rc::new(RefCell::new(build_stars(&container, &field.borrow())));

        // Regenerate on the first resize only
        {
            let field = field.clone();
            let stars = stars.clone();
            let container = container.clone();
            let closure = Closure::once(move |_event: web_sys::Event| {
                let (w, h) = web::viewport_size();
                field.borrow_mut().resize(w, h);
                *stars.borrow_mut() = build_stars(&container, &field.borrow());
            });
            let options = AddEventListenerOptions::new();
            options.set_once(true);
            let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                "resize",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        let mut clock = FrameClock::new();
        web::animation_loop(move |time| {
            if !container.is_connected() {
                log::info!("Starfield detached, stopping");
                return false;
            }
            let dt = clock.advance(time);
            let mut field = field.borrow_mut();
            field.tick(dt);
            for (star, sprite) in stars.borrow().iter().zip(field.sprites()) {
                web::set_style(
                    star,
                    "transform",
                    &format!("translate({:.1}px,{:.1}px)", sprite.pos.x, sprite.pos.y),
                );
            }
            true
        });

        log::info!("Starfield running ({} sprites)", config.star_count);
    }

    fn setup_matrix_rain(config: &PageConfig) {
        let Some(canvas) = web::by_id_as::<HtmlCanvasElement>(selectors::MATRIX_CANVAS) else {
            log::debug!("No matrix canvas, skipping");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::warn!("Canvas 2D unavailable, matrix rain disabled");
            return;
        };
        let Some(window) = web::window() else {
            return;
        };

        let (w, h) = web::viewport_size();
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
        let rain = Rc::new(RefCell::new(
            MatrixRain::new(w, h, config.glyph_size, web::time_seed())
                .with_reset_probability(config.matrix_reset_probability),
        ));

        // Resize the surface in place; column state carries over
        {
            let rain = rain.clone();
            let canvas = canvas.clone();
            listen(&window, "resize", move |_event| {
                let (w, h) = web::viewport_size();
                canvas.set_width(w as u32);
                canvas.set_height(h as u32);
                rain.borrow_mut().resize(w, h);
            });
        }

        let font = format!("{}px monospace", rain.borrow().glyph_size());
        let mut frame = MatrixFrame::default();
        let mut utf8 = [0u8; 4];
        web::animation_loop(move |_time| {
            if !canvas.is_connected() {
                return false;
            }
            let mut rain = rain.borrow_mut();
            rain.tick(&mut frame);
            let (w, h) = rain.size();

            ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {})", frame.fade_alpha));
            ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
            ctx.set_fill_style_str("#0f0");
            ctx.set_font(&font);
            for glyph in &frame.glyphs {
                let text = glyph.glyph.encode_utf8(&mut utf8);
                let _ = ctx.fill_text(text, glyph.x as f64, glyph.y as f64);
            }
            true
        });

        log::info!("Matrix rain running");
    }

    fn type_next(typewriter: Rc<RefCell<Typewriter>>, target: Element, generation: u64) {
        let delay = {
            let mut tw = typewriter.borrow_mut();
            if !tw.is_current(generation) {
                return;
            }
            let delay = tw.step();
            target.set_text_content(Some(&tw.visible()));
            delay
        };
        web::set_timeout(delay, move || type_next(typewriter, target, generation));
    }

    fn setup_typewriter(config: &PageConfig) {
        let Some(target) = web::by_id(selectors::HERO_TEXT) else {
            log::debug!("No hero text target, skipping");
            return;
        };

        let typewriter = Rc::new(RefCell::new(
            Typewriter::new(&config.hero_text, web::time_seed()).with_timing(
                config.type_min_delay_ms,
                config.type_max_delay_ms,
                config.type_dwell_ms,
            ),
        ));
        let generation = typewriter.borrow_mut().restart();
        target.set_text_content(Some(""));
        let first_delay = config.type_min_delay_ms;
        web::set_timeout(first_delay, move || type_next(typewriter, target, generation));
    }

    fn apply_reveal(el: &Element, effect: RevealEffect) {
        match effect {
            RevealEffect::Reveal => web::set_class(el, selectors::REVEALED_CLASS, true),
            RevealEffect::SetWidth(percent) => web::set_style(el, "width", &format!("{}%", percent)),
        }
    }

    fn setup_reveals(config: &PageConfig) {
        let mut source = IntersectionSource::new();

        for el in web::query_all(None, selectors::REVEAL) {
            let target = el.clone();
            watch(&mut source, &el, RevealTarget::fade(config.reveal_threshold), move |effect| {
                apply_reveal(&target, effect)
            });
        }

        for bar in web::query_all(None, selectors::SKILL_BAR) {
            let Some(percent) = bar
                .get_attribute(selectors::PROGRESS_ATTR)
                .as_deref()
                .and_then(parse_percent)
            else {
                log::debug!("Skill bar without a usable {}", selectors::PROGRESS_ATTR);
                continue;
            };
            let fill = bar
                .query_selector(selectors::SKILL_FILL)
                .ok()
                .flatten()
                .unwrap_or_else(|| bar.clone());
            watch(
                &mut source,
                &bar,
                RevealTarget::progress(percent, config.progress_threshold),
                move |effect| apply_reveal(&fill, effect),
            );
        }

        log::info!("Watching {} reveal targets", source.observed());
    }

    fn apply_modal_changes(changes: impl IntoIterator<Item = ModalChange>) {
        for change in changes {
            if let Some(dialog) = web::by_id(&change.id) {
                web::set_class(&dialog, selectors::OPEN_CLASS, change.open);
            }
            web::set_scroll_locked(change.scroll_locked);
        }
    }

    fn setup_modals() {
        let dialogs = web::query_all(None, selectors::MODAL);
        let ids: Vec<String> = dialogs
            .iter()
            .map(|d| d.id())
            .filter(|id| !id.is_empty())
            .collect();
        if ids.is_empty() {
            log::debug!("No dialogs, skipping");
            return;
        }
        let modals = Rc::new(RefCell::new(ModalController::new(ids, ScrollLock::new())));

        // Cards open their dialog
        for card in web::query_all(None, selectors::PROJECT_CARD) {
            let Some(id) = card.get_attribute(selectors::MODAL_ATTR) else {
                continue;
            };
            let modals = modals.clone();
            listen(&card, "click", move |_event| {
                apply_modal_changes(modals.borrow_mut().open(&id));
            });
        }

        for dialog in dialogs {
            let id = dialog.id();

            for close in web::query_all(Some(&dialog), selectors::MODAL_CLOSE) {
                let modals = modals.clone();
                let id = id.clone();
                listen(&close, "click", move |_event| {
                    apply_modal_changes(modals.borrow_mut().close(&id));
                });
            }

            // Backdrop: the click target is the dialog itself, not its panel
            let modals = modals.clone();
            let backdrop = dialog.clone();
            listen(&dialog, "click", move |event| {
                let on_backdrop = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .is_some_and(|t| t == backdrop);
                apply_modal_changes(modals.borrow_mut().backdrop_click(&id, on_backdrop));
            });
        }

        if let Some(document) = web::document() {
            listen(&document, "keydown", move |event| {
                let is_escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|e| e.key() == "Escape");
                if is_escape {
                    apply_modal_changes(modals.borrow_mut().escape());
                }
            });
        }
    }

    fn setup_filter() {
        let tabs = web::query_all(None, selectors::TAB_BUTTON);
        if tabs.is_empty() {
            log::debug!("No filter tabs, skipping");
            return;
        }
        let categories: Vec<String> = tabs
            .iter()
            .map(|t| t.get_attribute(selectors::CATEGORY_ATTR).unwrap_or_default())
            .collect();
        let filter = Rc::new(RefCell::new(CategoryFilter::new(categories)));
        let tabs = Rc::new(tabs);

        for (index, tab) in tabs.iter().enumerate() {
            let filter = filter.clone();
            let tabs = tabs.clone();
            listen(tab, "click", move |_event| {
                let mut filter = filter.borrow_mut();
                if filter.select(index).is_none() {
                    return;
                }
                for (tab, active) in tabs.iter().zip(filter.tab_states()) {
                    web::set_class(tab, selectors::ACTIVE_TAB_CLASS, active);
                }

                let cards = web::query_all(None, selectors::PROJECT_CARD);
                let tags: Vec<String> = cards
                    .iter()
                    .map(|c| c.get_attribute(selectors::CATEGORY_ATTR).unwrap_or_default())
                    .collect();
                let shown = filter.visibility(tags.iter().map(String::as_str));
                for (card, shown) in cards.iter().zip(shown) {
                    web::set_shown(card, shown);
                }
            });
        }
    }

    /// Capture named field values in markup order
    fn read_form(form: &HtmlFormElement) -> ContactForm {
        let root: &Element = form;
        let controls = web::query_all(Some(root), "[name]").into_iter().filter_map(|el| {
            let name = el.get_attribute("name")?;
            // Covers controls inside a disabled fieldset too
            let disabled = el.matches(":disabled").unwrap_or(false);
            let (kind, value, checked) = if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                (input.type_(), input.value(), input.checked())
            } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
                ("textarea".to_string(), area.value(), false)
            } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
                ("select".to_string(), select.value(), false)
            } else {
                return None;
            };
            Some(FormControl { name, kind, value, checked, disabled })
        });
        ContactForm::from_controls(controls)
    }

    fn show_status(status_el: Option<&Element>, status: SubmitStatus) {
        if let Some(el) = status_el {
            el.set_text_content(Some(status.message()));
            el.set_class_name(status.class_name());
        }
    }

    fn setup_contact_form(config: &PageConfig) {
        let Some(form) = web::by_id_as::<HtmlFormElement>(selectors::CONTACT_FORM) else {
            log::debug!("No contact form, skipping");
            return;
        };
        let endpoint = if config.form_endpoint.is_empty() {
            form.get_attribute("action").unwrap_or_default()
        } else {
            config.form_endpoint.clone()
        };
        if endpoint.is_empty() {
            log::warn!("Contact form has no endpoint configured, leaving it alone");
            return;
        }

        let status_el = web::by_id(selectors::FORM_STATUS);
        let submitter = Rc::new(FormSubmitter::new(endpoint, FetchTransport));
        let target = form.clone();
        listen(&target, "submit", move |event| {
            event.prevent_default();
            let form = form.clone();
            let status_el = status_el.clone();
            let submitter = submitter.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut fields = read_form(&form);
                let result = submitter
                    .submit(&mut fields, |status| show_status(status_el.as_ref(), status))
                    .await;
                if result == Some(SubmitStatus::Sent) {
                    form.reset();
                }
            });
        });

        log::info!("Contact form wired");
    }

    fn celebrate(burst: Celebration) {
        let Some(document) = web::document() else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let Ok(container) = document.create_element("div") else {
            return;
        };
        container.set_class_name(selectors::CELEBRATION_CLASS);

        for particle in &burst.particles {
            if let Ok(el) = document.create_element("div") {
                el.set_class_name(selectors::PARTICLE_CLASS);
                let _ = el.set_attribute("style", &Celebration::particle_style(particle));
                let _ = container.append_child(&el);
            }
        }
        let _ = body.append_child(&container);

        web::set_timeout(burst.cleanup_ms, move || container.remove());
    }

    fn setup_secret_sequence(config: &PageConfig) {
        let Some(document) = web::document() else {
            return;
        };
        let particles = config.celebration_particles;
        let cleanup_ms = config.celebration_cleanup_ms;
        let mut sequence = SecretSequence::new();

        listen(&document, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|e| e.key()) else {
                return;
            };
            if sequence.press(&key) {
                celebrate(Celebration::spawn(particles, cleanup_ms, web::time_seed()));
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let closure = Closure::once(move |_event: web_sys::Event| wasm_page::run());
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        wasm_page::run();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio FX (native) starting...");
    log::info!("Native mode has no DOM - build for wasm32 and serve the page for the real thing");

    println!("\nRunning headless animator pass...");
    headless_animators();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_animators() {
    use portfolio_fx::PageConfig;
    use portfolio_fx::fx::{FrameClock, MatrixFrame, MatrixRain, Starfield};

    let config = PageConfig::load();
    let (w, h) = (1280.0, 720.0);

    let mut field = Starfield::new(w, h, config.star_count, 42);
    let mut clock = FrameClock::new();
    for frame in 0..600 {
        field.tick(clock.advance(frame as f64 * portfolio_fx::consts::FRAME_MS));
    }
    let escaped = field
        .sprites()
        .iter()
        .filter(|s| !(0.0..w).contains(&s.pos.x) || !(0.0..h).contains(&s.pos.y))
        .count();
    assert_eq!(escaped, 0, "sprites escaped the viewport");
    println!("✓ Starfield: {} sprites stayed in bounds over 600 frames", field.sprites().len());

    let mut rain = MatrixRain::new(w, h, config.glyph_size, 42)
        .with_reset_probability(config.matrix_reset_probability);
    let mut paint = MatrixFrame::default();
    for _ in 0..600 {
        rain.tick(&mut paint);
    }
    println!(
        "✓ Matrix rain: {} columns, {} glyphs painted last frame",
        rain.drops().len(),
        paint.glyphs.len()
    );
}
