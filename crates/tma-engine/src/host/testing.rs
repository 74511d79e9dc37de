//! In-memory fakes for the host seams. Each records the calls it receives.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::error::HostError;
use crate::host::haptics::{ImpactStyle, NotificationType};
use crate::host::theme::{ColorScheme, ThemeParams};
use crate::host::traits::{AlertCallback, BrowserShell, ConfirmCallback, MiniAppHost};
use crate::host::user::WebAppUser;
use crate::host::viewport::Viewport;

pub(crate) type CallLog = Rc<RefCell<Vec<String>>>;

const THEME: &str = r##"{ "bg_color": "#17212b", "text_color": "#f5f5f5", "button_color": "#5288c1" }"##;

pub(crate) struct RecordingHost {
    calls: CallLog,
    version: String,
    fail_haptics: bool,
    answer: bool,
    viewport: Rc<Cell<Viewport>>,
    theme_json: Rc<RefCell<String>>,
}

impl RecordingHost {
    pub fn new(version: &str) -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            version: version.to_string(),
            fail_haptics: false,
            answer: false,
            viewport: Rc::new(Cell::new(Viewport {
                width: 400.0,
                height: 600.0,
                stable_height: 640.0,
                is_expanded: true,
            })),
            theme_json: Rc::new(RefCell::new(THEME.to_string())),
        }
    }

    pub fn failing_haptics(mut self) -> Self {
        self.fail_haptics = true;
        self
    }

    pub fn answering(mut self, answer: bool) -> Self {
        self.answer = answer;
        self
    }

    pub fn calls(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    pub fn viewport_cell(&self) -> Rc<Cell<Viewport>> {
        Rc::clone(&self.viewport)
    }

    pub fn theme_cell(&self) -> Rc<RefCell<String>> {
        Rc::clone(&self.theme_json)
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn haptic_result(&self) -> Result<(), HostError> {
        if self.fail_haptics {
            Err(HostError::Js("HapticFeedback threw".into()))
        } else {
            Ok(())
        }
    }
}

impl MiniAppHost for RecordingHost {
    fn ready(&self) {
        self.record("ready".into());
    }

    fn expand(&self) {
        self.record("expand".into());
    }

    fn close(&self) {
        self.record("close".into());
    }

    fn impact_occurred(&self, style: ImpactStyle) -> Result<(), HostError> {
        self.record(format!("impact:{}", style.as_str()));
        self.haptic_result()
    }

    fn notification_occurred(&self, kind: NotificationType) -> Result<(), HostError> {
        self.record(format!("notification:{}", kind.as_str()));
        self.haptic_result()
    }

    fn selection_changed(&self) -> Result<(), HostError> {
        self.record("selection".into());
        self.haptic_result()
    }

    fn show_confirm(&self, message: &str, callback: ConfirmCallback) {
        self.record(format!("confirm:{}", message));
        callback(self.answer);
    }

    fn show_alert(&self, message: &str, callback: AlertCallback) {
        self.record(format!("alert:{}", message));
        callback();
    }

    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn theme_params(&self) -> Result<ThemeParams, HostError> {
        ThemeParams::from_json(&self.theme_json.borrow())
    }

    fn color_scheme(&self) -> ColorScheme {
        ColorScheme::Dark
    }

    fn platform(&self) -> String {
        "test".into()
    }

    fn version(&self) -> String {
        self.version.clone()
    }

    fn init_data_user(&self) -> Option<WebAppUser> {
        WebAppUser::from_json(r#"{ "id": 99, "first_name": "Test" }"#).ok()
    }
}

pub(crate) struct RecordingShell {
    calls: CallLog,
    vars: Rc<RefCell<HashMap<String, String>>>,
    answer: bool,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            vars: Rc::new(RefCell::new(HashMap::new())),
            answer: true,
        }
    }

    pub fn answering(mut self, answer: bool) -> Self {
        self.answer = answer;
        self
    }

    pub fn calls(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    pub fn vars(&self) -> Rc<RefCell<HashMap<String, String>>> {
        Rc::clone(&self.vars)
    }
}

impl BrowserShell for RecordingShell {
    fn confirm(&self, message: &str) -> bool {
        self.calls.borrow_mut().push(format!("confirm:{}", message));
        self.answer
    }

    fn alert(&self, message: &str) {
        self.calls.borrow_mut().push(format!("alert:{}", message));
    }

    /// An empty value removes the property, as `style.setProperty` does.
    fn set_css_var(&self, name: &str, value: &str) {
        let mut vars = self.vars.borrow_mut();
        if value.is_empty() {
            vars.remove(name);
        } else {
            vars.insert(name.to_string(), value.to_string());
        }
    }

    fn inner_size(&self) -> (f32, f32) {
        (1024.0, 768.0)
    }
}
