// web/ - Browser experience
//
// mount() shows the start gate. Pressing it starts audio, creates the canvas
// and runs the world once per animation frame until Experience::stop().

mod audio;
mod canvas;
mod overlay;

pub use audio::AudioEngine;
pub use canvas::CanvasPainter;
pub use overlay::{BUTTON, Overlay, SUBTITLE, TITLE};

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlCanvasElement, Window};

use crate::config::{Config, DEFAULT_SEED};
use crate::render::Encoder;
use crate::sim::RainWorld;

const AUDIO_NOTICE: &str = "Sound could not start. The rain falls silently.";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Everything that exists only after the gate opens
struct Session {
    world: RainWorld,
    encoder: Encoder,
    painter: CanvasPainter,
    audio: Option<AudioEngine>,
}

impl Session {
    fn frame(&mut self) -> Result<(), JsValue> {
        self.world.tick();

        match &self.audio {
            Some(audio) => {
                for cue in self.world.drain_cues() {
                    // A dropped pluck is not worth stopping the rain for
                    let _ = audio.trigger_pluck(&cue);
                }
            }
            None => self.world.drain_cues().for_each(drop),
        }

        let cmds = self.encoder.encode(&self.world);
        self.painter.paint(cmds)
    }

    fn resize(&mut self, w: u32, h: u32) -> Result<(), JsValue> {
        self.world.resize(w, h);
        self.encoder.resize(w, h);
        self.painter.resize(w, h, self.encoder.grain())
    }

    fn teardown(mut self) {
        if let Some(mut audio) = self.audio.take() {
            audio.close();
        }
        self.painter.canvas().remove();
    }
}

struct Shared {
    window: Window,
    document: Document,
    container: Element,
    config: Config,
    session: Option<Session>,
    raf_id: Option<i32>,
    running: bool,
}

#[wasm_bindgen]
pub struct Experience {
    shared: Rc<RefCell<Shared>>,
    overlay: Option<Overlay>,
    tick: FrameCallback,
    on_resize: FrameCallback,
}

/// Show the start gate inside the element with `container_id` (or the body).
/// `config` is an optional JSON object, see `Config`.
#[wasm_bindgen]
pub fn mount(container_id: &str, config: Option<String>) -> Result<Experience, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let container: Element = match document.get_element_by_id(container_id) {
        Some(el) => el,
        None => document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .into(),
    };

    let mut config = match config {
        Some(json) => Config::from_json(&json).map_err(|e| JsValue::from_str(&e))?,
        None => Config::default(),
    };
    if config.seed == DEFAULT_SEED {
        config.seed = (js_sys::Math::random() * u32::MAX as f64) as u32 | 1;
    }

    let shared = Rc::new(RefCell::new(Shared {
        window,
        document: document.clone(),
        container: container.clone(),
        config,
        session: None,
        raf_id: None,
        running: false,
    }));
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let on_resize: FrameCallback = Rc::new(RefCell::new(None));

    let gate = {
        let shared = shared.clone();
        let tick = tick.clone();
        let on_resize = on_resize.clone();
        move || {
            if let Err(e) = begin(&shared, &tick, &on_resize) {
                console_warn!("glyph-rain failed to start: {:?}", e);
            }
        }
    };
    let overlay = Overlay::mount(&document, &container, gate)?;

    Ok(Experience { shared, overlay: Some(overlay), tick, on_resize })
}

#[wasm_bindgen]
impl Experience {
    /// Cancel the frame loop, detach listeners, close audio, remove the canvas
    pub fn stop(&mut self) {
        let session = {
            let mut s = self.shared.borrow_mut();
            s.running = false;
            if let Some(id) = s.raf_id.take() {
                let _ = s.window.cancel_animation_frame(id);
            }
            if let Some(cb) = self.on_resize.borrow_mut().take() {
                let _ = s
                    .window
                    .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
            }
            s.session.take()
        };

        // Breaks the callback's reference to itself
        self.tick.borrow_mut().take();

        if let Some(session) = session {
            session.teardown();
            console_log!("glyph-rain stopped");
        }
        if let Some(overlay) = self.overlay.take() {
            overlay.hide();
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().running
    }

    pub fn entity_count(&self) -> usize {
        self.shared
            .borrow()
            .session
            .as_ref()
            .map_or(0, |s| s.world.entities().len())
    }
}

impl Drop for Experience {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs once, from the gate's click handler
fn begin(
    shared: &Rc<RefCell<Shared>>,
    tick: &FrameCallback,
    on_resize: &FrameCallback,
) -> Result<(), JsValue> {
    let mut s = shared.borrow_mut();
    if s.running {
        return Ok(());
    }

    let seed = s.config.seed;
    let audio = match start_audio(seed) {
        Ok((audio, resumed)) => {
            if let Some(promise) = resumed {
                let (document, container) = (s.document.clone(), s.container.clone());
                spawn_local(async move {
                    resume_or_notice(promise, &document, &container).await;
                });
            }
            Some(audio)
        }
        Err(e) => {
            console_warn!("audio unavailable: {:?}", e);
            overlay::notice(&s.document, &s.container, AUDIO_NOTICE)?;
            None
        }
    };

    let canvas = s.document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
    canvas.set_attribute("style", "display:block;")?;
    s.container.append_child(&canvas)?;

    let (w, h) = window_size(&s.window)?;
    let mut session = Session {
        world: RainWorld::with_config(w, h, &s.config),
        encoder: Encoder::new(w, h, seed.rotate_left(16)),
        painter: CanvasPainter::new(&s.document, canvas)?,
        audio,
    };
    // Encoder::new already built grain for this size
    session.painter.resize(w, h, session.encoder.grain())?;

    s.session = Some(session);
    s.running = true;

    // Resize: new canvas size, new grain
    {
        let shared = shared.clone();
        let cb = Closure::<dyn FnMut()>::new(move || {
            let mut s = shared.borrow_mut();
            let Ok((w, h)) = window_size(&s.window) else { return };
            if let Some(session) = s.session.as_mut() {
                if let Err(e) = session.resize(w, h) {
                    console_warn!("resize failed: {:?}", e);
                }
            }
        });
        s.window
            .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
        *on_resize.borrow_mut() = Some(cb);
    }

    // Frame loop
    {
        let shared = shared.clone();
        let again = tick.clone();
        *tick.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            let mut s = shared.borrow_mut();
            if !s.running {
                return;
            }
            if let Some(session) = s.session.as_mut() {
                if let Err(e) = session.frame() {
                    console_warn!("frame failed: {:?}", e);
                }
            }
            if let Some(cb) = again.borrow().as_ref() {
                s.raf_id = s.window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
            }
        }));
    }

    if let Some(cb) = tick.borrow().as_ref() {
        s.raf_id = Some(s.window.request_animation_frame(cb.as_ref().unchecked_ref())?);
    }

    console_log!("glyph-rain started at {}x{}", w, h);
    Ok(())
}

fn start_audio(seed: u32) -> Result<(AudioEngine, Option<Promise>), JsValue> {
    let mut audio = AudioEngine::start(seed)?;
    let resumed = audio.resume()?;
    audio.start_ambient_noise()?;
    Ok((audio, resumed))
}

/// Wait for the context to resume; a refusal gets the silent-rain notice.
/// Returns whether audio is running.
async fn resume_or_notice(promise: Promise, document: &Document, container: &Element) -> bool {
    match JsFuture::from(promise).await {
        Ok(_) => true,
        Err(e) => {
            console_warn!("audio refused: {:?}", e);
            if let Err(e) = overlay::notice(document, container, AUDIO_NOTICE) {
                console_warn!("notice failed: {:?}", e);
            }
            false
        }
    }
}

fn window_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((w.max(1.0) as u32, h.max(1.0) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn scratch() -> (Document, Element) {
        let document = web_sys::window().and_then(|w| w.document()).unwrap();
        let container = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&container).unwrap();
        (document, container)
    }

    #[wasm_bindgen_test]
    async fn refused_resume_shows_notice() {
        let (document, container) = scratch();
        let refused = Promise::reject(&JsValue::from_str("NotAllowedError"));

        assert!(!resume_or_notice(refused, &document, &container).await);
        assert_eq!(container.text_content().as_deref(), Some(AUDIO_NOTICE));
        container.remove();
    }

    #[wasm_bindgen_test]
    async fn granted_resume_stays_quiet() {
        let (document, container) = scratch();
        let granted = Promise::resolve(&JsValue::UNDEFINED);

        assert!(resume_or_notice(granted, &document, &container).await);
        assert_eq!(container.child_element_count(), 0);
        container.remove();
    }
}
