use chrono::{SecondsFormat, Utc};
use relay::{
    consts::consts::{FIELD_SOURCE, FIELD_TIMESTAMP, SUCCESS_MESSAGE},
    model::{result::RelayResult, source::SourceTag},
};
use serde_json::Value;

use crate::{
    feedback::Banner,
    form::{collect_fields, FormElement, SubmitControlState},
    transport::{CaptureError, RelayTransport},
};

pub const ERROR_MESSAGE: &str = "Sorry, there was an error submitting your form. Please try again or call us directly at 0405678979.";
pub const BUSY_LABEL: &str = "Submitting...";

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureMessages {
    /// Shown when the relay reply has no message of its own
    pub success: String,
    pub error: String,
    pub busy_label: String,
}

impl CaptureMessages {
    pub fn set_success(mut self, success: impl Into<String>) -> Self {
        self.success = success.into();
        self
    }

    pub fn set_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    pub fn set_busy_label(mut self, busy_label: impl Into<String>) -> Self {
        self.busy_label = busy_label.into();
        self
    }
}

impl Default for CaptureMessages {
    fn default() -> Self {
        Self {
            success: SUCCESS_MESSAGE.to_string(),
            error: ERROR_MESSAGE.to_string(),
            busy_label: BUSY_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub name: &'static str,
    pub category: &'static str,
    pub label: String,
}

pub trait AnalyticsHook {
    fn track(&self, event: AnalyticsEvent);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(RelayResult),
    /// The submit control was disabled, a submission is already in flight
    Ignored,
}

/// Disables the submit control and shows the busy label until dropped, then restores the
/// original label and re-enables the control whatever the submission's outcome
struct BusyGuard<'a, F: FormElement + ?Sized> {
    form: &'a F,
    original: Option<SubmitControlState>,
}

impl<'a, F: FormElement + ?Sized> BusyGuard<'a, F> {
    fn acquire(form: &'a F, busy_label: &str) -> Self {
        let original = form.submit_control();

        if original.is_some() {
            form.set_submit_control(SubmitControlState {
                enabled: false,
                label: busy_label.to_string(),
            });
        }

        Self { form, original }
    }
}

impl<F: FormElement + ?Sized> Drop for BusyGuard<'_, F> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            self.form.set_submit_control(SubmitControlState {
                enabled: true,
                label: original.label,
            });
        }
    }
}

/// Handles submit events for any number of forms. Each submission runs
/// `idle -> submitting -> success | failure -> idle`, with the disabled submit control as the
/// only guard against a second submission while one is in flight.
pub struct CaptureController<T> {
    transport: T,
    messages: CaptureMessages,
    analytics: Option<Box<dyn AnalyticsHook>>,
}

impl<T: RelayTransport> CaptureController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            messages: CaptureMessages::default(),
            analytics: None,
        }
    }

    pub fn set_messages(mut self, messages: CaptureMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn set_analytics(mut self, analytics: Box<dyn AnalyticsHook>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs one submission of `form`. The default navigation is assumed cancelled by the caller
    /// before this is awaited.
    ///
    /// On failure the error banner is shown and the error is also returned, the form keeps its values.
    pub async fn on_submit<F: FormElement + ?Sized>(
        &self,
        form: &F,
        source: &str,
    ) -> Result<SubmitOutcome, CaptureError> {
        if form.submit_control().map(|c| !c.enabled).unwrap_or(false) {
            log::debug!("Ignoring submit on {}, a submission is in flight", form.key());
            return Ok(SubmitOutcome::Ignored);
        }

        let _busy = BusyGuard::acquire(form, &self.messages.busy_label);

        let mut payload = collect_fields(&form.fields(), SourceTag::parse(source));
        payload.insert(FIELD_SOURCE.to_string(), Value::String(source.to_string()));
        payload.insert(
            FIELD_TIMESTAMP.to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        match self.transport.send(&payload).await {
            Ok(result) => {
                let message = result
                    .message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| self.messages.success.clone());

                form.show_banner(Banner::success(message));
                form.reset();

                if let Some(analytics) = &self.analytics {
                    analytics.track(AnalyticsEvent {
                        name: "form_submit",
                        category: "engagement",
                        label: source.to_string(),
                    });
                }

                Ok(SubmitOutcome::Submitted(result))
            }
            Err(e) => {
                log::error!("Form submission error: {}", e);
                form.show_banner(Banner::error(self.messages.error.clone()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
pub mod test_utils {
    use std::{
        cell::RefCell,
        sync::atomic::{AtomicUsize, Ordering},
        time::Instant,
    };

    use relay::model::result::RelayResult;
    use serde_json::{Map, Value};

    use crate::{
        feedback::{Banner, BannerSlot},
        form::{FormElement, FormField, SubmitControlState},
        transport::{CaptureError, RelayTransport},
    };

    /// In memory stand in for a page form
    pub struct FakeForm {
        pub id: Option<String>,
        pub source: Option<String>,
        pub fields: RefCell<Vec<FormField>>,
        pub initial: Vec<FormField>,
        pub control: RefCell<Option<SubmitControlState>>,
        pub control_history: RefCell<Vec<SubmitControlState>>,
        pub banners: RefCell<BannerSlot>,
        pub banner_count: RefCell<usize>,
    }

    impl FakeForm {
        pub fn new(id: Option<&str>, source: Option<&str>, fields: Vec<FormField>) -> Self {
            Self {
                id: id.map(|s| s.to_string()),
                source: source.map(|s| s.to_string()),
                fields: RefCell::new(fields),
                initial: vec![],
                control: RefCell::new(Some(SubmitControlState {
                    enabled: true,
                    label: "Get in touch".to_string(),
                })),
                control_history: RefCell::new(vec![]),
                banners: RefCell::new(BannerSlot::new()),
                banner_count: RefCell::new(0),
            }
        }

        pub fn banner(&self) -> Option<Banner> {
            self.banners.borrow_mut().visible(Instant::now()).cloned()
        }
    }

    impl FormElement for FakeForm {
        fn key(&self) -> String {
            self.id
                .clone()
                .or_else(|| self.source.clone())
                .unwrap_or_default()
        }

        fn element_id(&self) -> Option<String> {
            self.id.clone()
        }

        fn data_source(&self) -> Option<String> {
            self.source.clone()
        }

        fn fields(&self) -> Vec<FormField> {
            self.fields.borrow().clone()
        }

        fn reset(&self) {
            *self.fields.borrow_mut() = self.initial.clone();
        }

        fn submit_control(&self) -> Option<SubmitControlState> {
            self.control.borrow().clone()
        }

        fn set_submit_control(&self, state: SubmitControlState) {
            self.control_history.borrow_mut().push(state.clone());
            *self.control.borrow_mut() = Some(state);
        }

        fn show_banner(&self, banner: Banner) {
            *self.banner_count.borrow_mut() += 1;
            self.banners.borrow_mut().show(banner, Instant::now());
        }
    }

    pub enum FakeRelayReply {
        Ok(Option<&'static str>),
        Rejected(&'static str),
    }

    /// Yields once before answering so concurrent submissions interleave
    pub struct FakeRelay {
        pub reply: FakeRelayReply,
        pub sent: RefCell<Vec<Map<String, Value>>>,
        pub calls: AtomicUsize,
    }

    impl FakeRelay {
        pub fn new(reply: FakeRelayReply) -> Self {
            Self {
                reply,
                sent: RefCell::new(vec![]),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RelayTransport for FakeRelay {
        async fn send(&self, payload: &Map<String, Value>) -> Result<RelayResult, CaptureError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.borrow_mut().push(payload.clone());

            tokio::task::yield_now().await;

            match self.reply {
                FakeRelayReply::Ok(message) => Ok(RelayResult {
                    success: true,
                    message: message.map(|m| m.to_string()),
                    person_created: true,
                    opportunity_created: true,
                }),
                FakeRelayReply::Rejected(error) => Err(CaptureError::Rejected(error.to_string())),
            }
        }
    }
}
