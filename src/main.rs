//! Lottery Machine entry point
//!
//! On the web this wires the canvas, buttons and draw video to a `Lottery`
//! and runs the animation loop. Natively it runs a headless draw session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{
        Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlInputElement,
        HtmlVideoElement, KeyboardEvent, MouseEvent,
    };

    use lottery_machine::renderer::CanvasSurface;
    use lottery_machine::reveal::{ResultSink, Timer, TransitionMedia, run_draw};
    use lottery_machine::sim::Settled;
    use lottery_machine::{
        Command, CommandOutcome, DrawOutcome, DrawStats, Lottery, MediaError, PrizeList, Settings,
    };

    /// How long the body keeps its "shake" class
    const SHAKE_ANIMATION_MS: u32 = 500;

    /// Everything the page shares between callbacks
    struct App {
        lottery: RefCell<Lottery>,
        surface: RefCell<CanvasSurface>,
        document: Document,
        /// Prize list being edited while the editor modal is open
        draft: RefCell<Option<PrizeList>>,
    }

    impl App {
        fn sink(&self) -> DomResultSink {
            DomResultSink {
                document: self.document.clone(),
            }
        }

        fn media(&self) -> VideoMedia {
            VideoMedia {
                document: self.document.clone(),
                url: self.lottery.borrow().settings().video_url.clone(),
            }
        }

        /// Route one command and start whatever it kicks off
        fn dispatch(self: &Rc<Self>, command: Command) {
            let is_reset = matches!(command, Command::Reset | Command::ReplacePrizes(_));
            let is_shake = command == Command::Shake;
            let outcome = self.lottery.borrow_mut().apply(command);

            match outcome {
                CommandOutcome::DrawStarted(ticket) => {
                    let app = Rc::clone(self);
                    spawn_local(async move {
                        let mut media = app.media();
                        let mut sink = app.sink();
                        run_draw(&app.lottery, ticket, &mut media, &BrowserTimer, &mut sink).await;
                    });
                }
                CommandOutcome::Settled(settled) => {
                    let stats = self.lottery.borrow().stats();
                    self.sink().on_settled(settled, stats);
                }
                CommandOutcome::Applied if is_reset => {
                    let stats = self.lottery.borrow().stats();
                    let mut sink = self.sink();
                    sink.clear_result();
                    sink.on_stats(stats);
                }
                CommandOutcome::Applied if is_shake => {
                    let document = self.document.clone();
                    set_class(&document, "body", "shake", true);
                    spawn_local(async move {
                        BrowserTimer.sleep(SHAKE_ANIMATION_MS).await;
                        set_class(&document, "body", "shake", false);
                    });
                }
                CommandOutcome::Applied | CommandOutcome::Ignored => {}
            }
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Toggle a CSS class on the element with `id` ("body" means the body)
    fn set_class(document: &Document, id: &str, class: &str, on: bool) {
        let el = if id == "body" {
            document.body().map(|b| b.into())
        } else {
            document.get_element_by_id(id)
        };
        if let Some(el) = el {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    fn js_error(err: JsValue) -> MediaError {
        MediaError::Playback(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
    }

    /// `setTimeout` as a future
    struct BrowserTimer;

    impl Timer for BrowserTimer {
        async fn sleep(&self, ms: u32) {
            let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                if let Some(window) = web_sys::window() {
                    let _ = window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
                }
            });
            let _ = JsFuture::from(promise).await;
        }
    }

    /// The `#drawVideo` overlay and the `#lightEffect` flash
    struct VideoMedia {
        document: Document,
        url: Option<String>,
    }

    impl VideoMedia {
        async fn play_to_end(video: &HtmlVideoElement) -> Result<(), MediaError> {
            video.set_current_time(0.0);
            let ended = js_sys::Promise::new(&mut |resolve, reject| {
                video.set_onended(Some(&resolve));
                video.set_onerror(Some(&reject));
            });

            let result = Self::await_playback(video, ended).await;
            video.set_onended(None);
            video.set_onerror(None);
            result.map_err(js_error)
        }

        async fn await_playback(
            video: &HtmlVideoElement,
            ended: js_sys::Promise,
        ) -> Result<(), JsValue> {
            JsFuture::from(video.play()?).await?;
            JsFuture::from(ended).await?;
            Ok(())
        }
    }

    impl TransitionMedia for VideoMedia {
        async fn play_video(&mut self) -> Result<(), MediaError> {
            let video: HtmlVideoElement =
                element(&self.document, "drawVideo").ok_or(MediaError::Unavailable)?;
            if let Some(url) = &self.url {
                video.set_src(url);
            }
            if video.src().is_empty() {
                return Err(MediaError::Unavailable);
            }

            set_class(&self.document, "videoOverlay", "show", true);
            let result = Self::play_to_end(&video).await;
            set_class(&self.document, "videoOverlay", "show", false);
            result
        }

        fn set_light(&mut self, on: bool) {
            set_class(&self.document, "lightEffect", "show", on);
        }
    }

    /// Result text, counters, the winner ball and the draw button
    struct DomResultSink {
        document: Document,
    }

    impl DomResultSink {
        fn set_draw_enabled(&self, enabled: bool) {
            if let Some(btn) = element::<HtmlButtonElement>(&self.document, "drawBtn") {
                btn.set_disabled(!enabled);
            }
        }

        fn clear_result(&mut self) {
            set_class(&self.document, "selectedBall", "show", false);
            set_class(&self.document, "videoOverlay", "show", false);
            set_class(&self.document, "lightEffect", "show", false);
            set_class(&self.document, "body", "shake", false);
            set_text(&self.document, "result", "");
            self.set_draw_enabled(true);
        }
    }

    impl ResultSink for DomResultSink {
        fn on_draw_started(&mut self) {
            self.set_draw_enabled(false);
            set_text(&self.document, "result", "Drawing...");
        }

        fn on_winner(&mut self, outcome: &DrawOutcome) {
            set_class(&self.document, "body", "shake", true);
            set_text(&self.document, "result", &format!("Winner: {}", outcome.label));
            if let Some(ball) = element::<HtmlElement>(&self.document, "selectedBall") {
                ball.set_text_content(Some(&outcome.label));
                let _ = ball.style().set_property("background-color", &outcome.color.css());
                let _ = ball.class_list().add_1("show");
            }
            self.on_stats(outcome.stats);
        }

        fn on_settled(&mut self, settled: Settled, stats: DrawStats) {
            set_class(&self.document, "selectedBall", "show", false);
            set_class(&self.document, "body", "shake", false);
            self.on_stats(stats);
            match settled {
                Settled::Ready => self.set_draw_enabled(true),
                Settled::Exhausted => {
                    set_text(&self.document, "result", "All prizes have been drawn");
                    self.set_draw_enabled(false);
                }
            }
        }

        fn on_stats(&mut self, stats: DrawStats) {
            set_text(&self.document, "totalBalls", &stats.remaining.to_string());
            set_text(&self.document, "drawCount", &stats.draws.to_string());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        if let Err(err) = start() {
            log::error!("Lottery failed to start: {:?}", err);
        }
    }

    fn start() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement =
            element(&document, "canvas").ok_or("missing #canvas element")?;

        let surface = CanvasSurface::new(canvas)?;
        surface.fit_to_container();

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let prizes = PrizeList::load();
        log::info!(
            "Lottery starting: {} prizes, preset {}, seed {}",
            prizes.len(),
            settings.preset.as_str(),
            seed
        );

        let app = Rc::new(App {
            lottery: RefCell::new(Lottery::new(prizes, settings, seed)),
            surface: RefCell::new(surface),
            document,
            draft: RefCell::new(None),
        });

        app.sink().on_stats(DrawStats {
            remaining: app.lottery.borrow().prizes().len(),
            draws: 0,
        });

        setup_buttons(&app);
        setup_editor(&app);
        setup_video_url(&app);
        setup_keyboard(&app);
        setup_resize(&app);
        request_animation_frame(app);
        Ok(())
    }

    fn on_click(app: &Rc<App>, id: &str, command: impl Fn() -> Command + 'static) {
        let Some(el) = app.document.get_element_by_id(id) else {
            log::debug!("No #{} element, skipping", id);
            return;
        };
        let app = Rc::clone(app);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.dispatch(command());
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: &Rc<App>) {
        on_click(app, "drawBtn", || Command::Draw);
        on_click(app, "resetBtn", || Command::Reset);
        on_click(app, "shakeBtn", || Command::Shake);
        on_click(app, "selectedBall", || Command::Dismiss);
    }

    fn listen<E>(target: &web_sys::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// `data-index` of the element an event hit
    fn event_index(event: &web_sys::Event) -> Option<(Element, usize)> {
        let el = event.target()?.dyn_into::<Element>().ok()?;
        let index = el.get_attribute("data-index")?.parse().ok()?;
        Some((el, index))
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    /// Rebuild the `#prizeList` rows from the draft
    fn render_prize_list(app: &App) -> Result<(), JsValue> {
        let Some(list) = app.document.get_element_by_id("prizeList") else {
            return Ok(());
        };
        list.set_inner_html("");
        let draft = app.draft.borrow();
        let Some(draft) = draft.as_ref() else {
            return Ok(());
        };

        for (index, label) in draft.labels().iter().enumerate() {
            let row = app.document.create_element("div")?;
            row.set_class_name("prize-item");

            let input = app.document.create_element("input")?.dyn_into::<HtmlInputElement>()?;
            input.set_type("text");
            input.set_value(label);
            input.set_attribute("data-index", &index.to_string())?;

            let remove = app.document.create_element("button")?;
            remove.set_text_content(Some("Delete"));
            remove.set_attribute("data-index", &index.to_string())?;

            row.append_child(&input)?;
            row.append_child(&remove)?;
            list.append_child(&row)?;
        }
        Ok(())
    }

    fn refresh_prize_list(app: &App) {
        if let Err(err) = render_prize_list(app) {
            log::warn!("Prize list not rendered: {:?}", err);
        }
    }

    fn open_editor(app: &Rc<App>) {
        let prizes = app.lottery.borrow().prizes().clone();
        *app.draft.borrow_mut() = Some(prizes);
        set_class(&app.document, "editModal", "active", true);
        refresh_prize_list(app);
    }

    /// Save the draft and rebuild the drum from it
    fn close_editor(app: &Rc<App>) {
        set_class(&app.document, "editModal", "active", false);
        let Some(draft) = app.draft.borrow_mut().take() else {
            return;
        };
        if let Err(err) = draft.save() {
            log::error!("Prizes not saved: {}", err);
        }
        app.dispatch(Command::ReplacePrizes(draft));
    }

    fn setup_editor(app: &Rc<App>) {
        let document = &app.document;

        if let Some(btn) = document.get_element_by_id("editBtn") {
            let app = Rc::clone(app);
            listen(&btn, "click", move |_event: MouseEvent| open_editor(&app));
        }

        if let Some(btn) = document.get_element_by_id("closeModal") {
            let app = Rc::clone(app);
            listen(&btn, "click", move |_event: MouseEvent| close_editor(&app));
        }

        if let Some(modal) = document.get_element_by_id("editModal") {
            let app = Rc::clone(app);
            let modal_ref = modal.clone();
            listen(&modal, "click", move |event: MouseEvent| {
                // Clicks on the backdrop only, not on the dialog inside it
                let on_backdrop = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .is_some_and(|t| t == modal_ref);
                if on_backdrop {
                    close_editor(&app);
                }
            });
        }

        if let Some(btn) = document.get_element_by_id("addPrizeBtn") {
            let app = Rc::clone(app);
            listen(&btn, "click", move |_event: MouseEvent| {
                if let Some(draft) = app.draft.borrow_mut().as_mut() {
                    draft.add("");
                }
                refresh_prize_list(&app);
            });
        }

        let Some(list) = document.get_element_by_id("prizeList") else {
            return;
        };
        {
            let app = Rc::clone(app);
            listen(&list, "change", move |event: web_sys::Event| {
                let Some((el, index)) = event_index(&event) else {
                    return;
                };
                let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
                    return;
                };
                let renamed = match app.draft.borrow_mut().as_mut() {
                    Some(draft) => draft.rename(index, &input.value()),
                    None => return,
                };
                if let Err(err) = renamed {
                    log::warn!("Rename refused: {}", err);
                    refresh_prize_list(&app);
                }
            });
        }
        {
            let app = Rc::clone(app);
            listen(&list, "click", move |event: MouseEvent| {
                let Some((el, index)) = event_index(&event) else {
                    return;
                };
                if el.tag_name() != "BUTTON" {
                    return;
                }
                let removed = match app.draft.borrow_mut().as_mut() {
                    Some(draft) => draft.remove(index),
                    None => return,
                };
                match removed {
                    Ok(label) => log::info!("Removed prize '{}'", label),
                    Err(err) => alert(&format!("Cannot remove prize: {}", err)),
                }
                refresh_prize_list(&app);
            });
        }
    }

    /// `#saveVideoBtn` stores the `#videoUrl` field as the draw video
    fn setup_video_url(app: &Rc<App>) {
        if let (Some(field), Some(url)) = (
            element::<HtmlInputElement>(&app.document, "videoUrl"),
            app.lottery.borrow().settings().video_url.as_deref(),
        ) {
            field.set_value(url);
        }

        let Some(btn) = app.document.get_element_by_id("saveVideoBtn") else {
            return;
        };
        let app = Rc::clone(app);
        listen(&btn, "click", move |_event: MouseEvent| {
            let Some(field) = element::<HtmlInputElement>(&app.document, "videoUrl") else {
                return;
            };
            let mut settings = app.lottery.borrow().settings().clone();
            settings.set_video_url(&field.value());
            if let Err(err) = app.lottery.borrow_mut().replace_settings(settings.clone()) {
                log::error!("Settings rejected: {}", err);
                return;
            }
            match settings.save() {
                Ok(()) => log::info!("Draw video set to {:?}", settings.video_url),
                Err(err) => log::error!("Settings not saved: {}", err),
            }
        });
    }

    fn setup_keyboard(app: &Rc<App>) {
        let app_ref = Rc::clone(app);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let command = match event.key().as_str() {
                " " | "Enter" => Command::Draw,
                "Escape" => Command::Dismiss,
                "s" | "S" => Command::Shake,
                _ => return,
            };
            event.prevent_default();
            app_ref.dispatch(command);
        });
        let _ = app
            .document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(app: &Rc<App>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app = Rc::clone(app);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.surface.borrow().fit_to_container();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<App>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<App>) {
        {
            let mut surface = app.surface.borrow_mut();
            app.lottery.borrow_mut().frame(&mut *surface);
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Lottery Machine (native) starting...");
    log::info!("The interactive drum runs in the browser; running a headless session");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);
    headless_session(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

/// Draw every prize of a short list, letting the drum run between draws
#[cfg(not(target_arch = "wasm32"))]
fn headless_session(seed: u64) {
    use lottery_machine::sim::Settled;
    use lottery_machine::{Command, CommandOutcome, Lottery, PrizeList, Settings};

    const FRAMES_BETWEEN_DRAWS: usize = 120;

    let prizes = match PrizeList::from_entries(["Grand Prize", "Second Prize", "Third Prize", "Thank You"]) {
        Ok(prizes) => prizes,
        Err(e) => {
            log::error!("Bad prize list: {}", e);
            return;
        }
    };
    let mut lottery = Lottery::new(prizes, Settings::default(), seed);
    lottery.resize(800.0, 600.0);

    loop {
        for _ in 0..FRAMES_BETWEEN_DRAWS {
            lottery.tick();
        }
        let CommandOutcome::DrawStarted(ticket) = lottery.apply(Command::Draw) else {
            break;
        };
        lottery.begin_reveal(&ticket);
        if let Some(outcome) = lottery.finish_reveal(&ticket) {
            println!(
                "Draw {}: {} ({} left)",
                outcome.stats.draws, outcome.label, outcome.stats.remaining
            );
        }
        if lottery.apply(Command::Dismiss) == CommandOutcome::Settled(Settled::Exhausted) {
            println!("All prizes drawn");
            break;
        }
    }
}
