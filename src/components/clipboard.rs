//! Clipboard writer: async clipboard API when the page is a secure context,
//! hidden-textarea `execCommand("copy")` otherwise.

use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use thiserror::Error;

use crate::config::ErrorVerbosity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("Clipboard is unavailable: {0}")]
    Unavailable(String),
    #[error("Clipboard access was denied: {0}")]
    Denied(String),
}

impl CopyError {
    /// Banner text telling the user to copy `value` by hand.
    pub fn manual_copy_prompt(&self, value: &str, verbosity: ErrorVerbosity) -> String {
        match verbosity {
            ErrorVerbosity::Detailed => format!("Please copy manually: {value} ({self})"),
            ErrorVerbosity::Brief => format!("Please copy manually: {value}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    /// `navigator.clipboard.writeText` resolved.
    Clipboard,
    /// Legacy copy command ran. Browsers report `false` when they refuse
    /// silently, which still counts as best-effort success.
    LegacyCommand { confirmed: bool },
}

/// Platform clipboard capability.
///
/// Both writes must start their side effect before returning: the copy
/// command and `writeText` only honour the click's user activation while the
/// handler is still on the stack. The returned futures only report the outcome.
pub trait ClipboardBackend {
    /// Secure context with `navigator.clipboard` present.
    fn supports_async_write(&self) -> bool;

    fn write_async(&self, text: &str) -> LocalBoxFuture<'static, Result<(), CopyError>>;

    /// Off-screen text field + copy command. The field must be removed
    /// whatever the outcome.
    fn write_legacy(&self, text: &str) -> LocalBoxFuture<'static, Result<bool, CopyError>>;
}

/// Copy `value` once, no retry. The write is issued before this returns;
/// call it straight from the click handler and spawn the returned future.
pub fn copy_text<B>(backend: &B, value: &str) -> LocalBoxFuture<'static, Result<CopyMethod, CopyError>>
where
    B: ClipboardBackend + ?Sized,
{
    if backend.supports_async_write() {
        return backend
            .write_async(value)
            .map(|written| written.map(|()| CopyMethod::Clipboard))
            .boxed_local();
    }
    backend
        .write_legacy(value)
        .map(|written| written.map(|confirmed| CopyMethod::LegacyCommand { confirmed }))
        .boxed_local()
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserClipboard as PlatformClipboard;
#[cfg(not(target_arch = "wasm32"))]
pub use webview::WebviewClipboard as PlatformClipboard;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{ClipboardBackend, CopyError};
    use crate::components::js_error_message;
    use futures_util::future::{self, LocalBoxFuture};
    use futures_util::FutureExt;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{window, HtmlDocument, HtmlTextAreaElement};

    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserClipboard;

    fn clipboard_object() -> Option<JsValue> {
        let navigator = window()?.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &"clipboard".into()).ok()?;
        if clipboard.is_null() || clipboard.is_undefined() {
            return None;
        }
        Some(clipboard)
    }

    /// Calls `writeText` now and hands back its promise.
    fn start_write_text(text: &str) -> Result<js_sys::Promise, CopyError> {
        let clipboard = clipboard_object()
            .ok_or_else(|| CopyError::Unavailable("navigator.clipboard is missing".to_string()))?;
        let write = js_sys::Reflect::get(&clipboard, &"writeText".into())
            .ok()
            .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| CopyError::Unavailable("clipboard.writeText is missing".to_string()))?;
        write
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(|err| CopyError::Denied(js_error_message(&err)))?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| CopyError::Denied("clipboard.writeText returned no promise".to_string()))
    }

    fn copy_with_command(text: &str) -> Result<bool, CopyError> {
        let unavailable = |what: &str| CopyError::Unavailable(what.to_string());
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| unavailable("no document"))?;
        let body = document.body().ok_or_else(|| unavailable("no document body"))?;
        let field: HtmlTextAreaElement = document
            .create_element("textarea")
            .map_err(|err| CopyError::Unavailable(js_error_message(&err)))?
            .dyn_into()
            .map_err(|_| unavailable("textarea could not be created"))?;
        field.set_value(text);
        field.set_attribute("readonly", "").ok();
        let style = field.style();
        style.set_property("position", "fixed").ok();
        style.set_property("left", "-999999px").ok();
        style.set_property("top", "-999999px").ok();
        body.append_child(&field)
            .map_err(|err| CopyError::Unavailable(js_error_message(&err)))?;

        let _ = field.focus();
        field.select();
        let result = document
            .dyn_ref::<HtmlDocument>()
            .ok_or_else(|| unavailable("document does not support copy commands"))
            .and_then(|html| {
                html.exec_command("copy")
                    .map_err(|err| CopyError::Denied(js_error_message(&err)))
            });
        field.remove();
        result
    }

    impl ClipboardBackend for BrowserClipboard {
        fn supports_async_write(&self) -> bool {
            let secure = window().map(|w| w.is_secure_context()).unwrap_or(false);
            secure && clipboard_object().is_some()
        }

        fn write_async(&self, text: &str) -> LocalBoxFuture<'static, Result<(), CopyError>> {
            match start_write_text(text) {
                Ok(promise) => wasm_bindgen_futures::JsFuture::from(promise)
                    .map(|settled| {
                        settled
                            .map(|_| ())
                            .map_err(|err| CopyError::Denied(js_error_message(&err)))
                    })
                    .boxed_local(),
                Err(err) => future::ready(Err(err)).boxed_local(),
            }
        }

        fn write_legacy(&self, text: &str) -> LocalBoxFuture<'static, Result<bool, CopyError>> {
            future::ready(copy_with_command(text)).boxed_local()
        }
    }
}

/// Desktop builds render into a webview, so the same two paths run as
/// scripts inside it.
#[cfg(not(target_arch = "wasm32"))]
mod webview {
    use super::{ClipboardBackend, CopyError};
    use crate::components::{js_string_literal, ScriptOutcome};
    use dioxus::prelude::*;
    use futures_util::future::LocalBoxFuture;
    use futures_util::FutureExt;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct WebviewClipboard;

    const COPY_COMMAND_JS: &str = r#"
        const field = document.createElement("textarea");
        field.value = text;
        field.setAttribute("readonly", "");
        field.style.position = "fixed";
        field.style.left = "-999999px";
        field.style.top = "-999999px";
        document.body.appendChild(field);
        try {
            field.focus();
            field.select();
            const confirmed = document.execCommand("copy");
            return { ok: true, confirmed: !!confirmed };
        } catch (err) {
            return { ok: false, name: (err && err.name) || "", message: (err && err.message) || String(err) };
        } finally {
            field.remove();
        }
    "#;

    /// Runs `body` with `text` bound, and reads back a `ScriptOutcome`.
    fn run_with_text(body: &str, text: &str) -> LocalBoxFuture<'static, Result<ScriptOutcome, CopyError>> {
        let script = format!(
            r#"return (async function () {{
                const text = {text};
                {body}
            }})();"#,
            text = js_string_literal(text),
        );
        let eval = document::eval(&script);
        async move {
            eval.join::<ScriptOutcome>()
                .await
                .map_err(|err| CopyError::Unavailable(format!("webview script failed: {err:?}")))
        }
        .boxed_local()
    }

    fn denied(outcome: &ScriptOutcome) -> CopyError {
        if outcome.name == "NotSupportedError" {
            return CopyError::Unavailable(outcome.message.clone());
        }
        CopyError::Denied(outcome.message.clone())
    }

    impl ClipboardBackend for WebviewClipboard {
        /// Webview pages load from the app's own scheme, which engines do not
        /// consistently treat as a secure context.
        fn supports_async_write(&self) -> bool {
            false
        }

        fn write_async(&self, text: &str) -> LocalBoxFuture<'static, Result<(), CopyError>> {
            let write = run_with_text(
                r#"
                try {
                    await navigator.clipboard.writeText(text);
                    return { ok: true };
                } catch (err) {
                    return { ok: false, name: (err && err.name) || "", message: (err && err.message) || String(err) };
                }
                "#,
                text,
            );
            async move {
                let outcome = write.await?;
                if outcome.ok {
                    Ok(())
                } else {
                    Err(denied(&outcome))
                }
            }
            .boxed_local()
        }

        fn write_legacy(&self, text: &str) -> LocalBoxFuture<'static, Result<bool, CopyError>> {
            let write = run_with_text(COPY_COMMAND_JS, text);
            async move {
                let outcome = write.await?;
                if outcome.ok {
                    Ok(outcome.confirmed)
                } else {
                    Err(denied(&outcome))
                }
            }
            .boxed_local()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future;
    use std::cell::{Cell, RefCell};

    /// Records writes when they are issued, like the real backends do.
    #[derive(Default)]
    struct FakeClipboard {
        secure: bool,
        deny_async: bool,
        legacy: Option<Result<bool, CopyError>>,
        written: RefCell<Vec<String>>,
        async_calls: Cell<usize>,
        legacy_calls: Cell<usize>,
    }

    impl ClipboardBackend for FakeClipboard {
        fn supports_async_write(&self) -> bool {
            self.secure
        }

        fn write_async(&self, text: &str) -> LocalBoxFuture<'static, Result<(), CopyError>> {
            self.async_calls.set(self.async_calls.get() + 1);
            if self.deny_async {
                return future::ready(Err(CopyError::Denied(
                    "Document is not focused.".to_string(),
                )))
                .boxed_local();
            }
            self.written.borrow_mut().push(text.to_string());
            future::ready(Ok(())).boxed_local()
        }

        fn write_legacy(&self, text: &str) -> LocalBoxFuture<'static, Result<bool, CopyError>> {
            self.legacy_calls.set(self.legacy_calls.get() + 1);
            let result = self.legacy.clone().unwrap_or(Ok(true));
            if result.is_ok() {
                self.written.borrow_mut().push(text.to_string());
            }
            future::ready(result).boxed_local()
        }
    }

    #[tokio::test]
    async fn secure_context_uses_the_async_clipboard() {
        let clipboard = FakeClipboard {
            secure: true,
            ..Default::default()
        };
        let method = copy_text(&clipboard, "play.corpssmp.lol").await;
        assert_eq!(method, Ok(CopyMethod::Clipboard));
        assert_eq!(*clipboard.written.borrow(), vec!["play.corpssmp.lol"]);
        assert_eq!(clipboard.legacy_calls.get(), 0);
    }

    #[tokio::test]
    async fn write_is_issued_before_the_caller_awaits() {
        let secure = FakeClipboard {
            secure: true,
            ..Default::default()
        };
        let pending = copy_text(&secure, "play.corpssmp.lol");
        assert_eq!(secure.async_calls.get(), 1);
        assert_eq!(*secure.written.borrow(), vec!["play.corpssmp.lol"]);
        assert_eq!(pending.await, Ok(CopyMethod::Clipboard));

        let insecure = FakeClipboard::default();
        let pending = copy_text(&insecure, "play.corpssmp.lol");
        assert_eq!(insecure.legacy_calls.get(), 1);
        assert_eq!(
            pending.await,
            Ok(CopyMethod::LegacyCommand { confirmed: true })
        );
    }

    #[tokio::test]
    async fn insecure_context_falls_back_to_the_copy_command() {
        let clipboard = FakeClipboard::default();
        let method = copy_text(&clipboard, "play.corpssmp.lol").await;
        assert_eq!(method, Ok(CopyMethod::LegacyCommand { confirmed: true }));
        assert_eq!(clipboard.legacy_calls.get(), 1);
        assert_eq!(clipboard.async_calls.get(), 0);
    }

    #[tokio::test]
    async fn refused_copy_command_is_still_best_effort_success() {
        let clipboard = FakeClipboard {
            legacy: Some(Ok(false)),
            ..Default::default()
        };
        let method = copy_text(&clipboard, "play.corpssmp.lol").await;
        assert_eq!(method, Ok(CopyMethod::LegacyCommand { confirmed: false }));
    }

    #[tokio::test]
    async fn denial_is_reported_without_retrying() {
        let clipboard = FakeClipboard {
            secure: true,
            deny_async: true,
            ..Default::default()
        };
        let err = copy_text(&clipboard, "play.corpssmp.lol").await.unwrap_err();
        assert_eq!(err, CopyError::Denied("Document is not focused.".to_string()));
        assert_eq!(clipboard.legacy_calls.get(), 0);
        assert!(clipboard.written.borrow().is_empty());
    }

    #[tokio::test]
    async fn failed_copy_command_asks_for_a_manual_copy() {
        let clipboard = FakeClipboard {
            legacy: Some(Err(CopyError::Unavailable("no document body".to_string()))),
            ..Default::default()
        };
        let err = copy_text(&clipboard, "play.corpssmp.lol").await.unwrap_err();
        assert_eq!(
            err.manual_copy_prompt("play.corpssmp.lol", ErrorVerbosity::Brief),
            "Please copy manually: play.corpssmp.lol"
        );
        assert_eq!(
            err.manual_copy_prompt("play.corpssmp.lol", ErrorVerbosity::Detailed),
            "Please copy manually: play.corpssmp.lol (Clipboard is unavailable: no document body)"
        );
    }
}
