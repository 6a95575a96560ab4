// Desktop-webview helpers shared by the clipboard writer and the music controller.
use serde::Deserialize;

/// What a bridge script reports back through `document::eval`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScriptOutcome {
    pub ok: bool,
    /// `DOMException.name` of whatever the script caught.
    pub name: String,
    pub message: String,
    /// Return value of `execCommand("copy")`.
    pub confirmed: bool,
}

/// Quote `value` as a JavaScript string literal for an eval'd script.
pub fn js_string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_escape_quotes_and_newlines() {
        assert_eq!(js_string_literal("play.corpssmp.lol"), "\"play.corpssmp.lol\"");
        assert_eq!(
            js_string_literal("say \"hi\"\n</script>"),
            "\"say \\\"hi\\\"\\n</script>\""
        );
    }

    #[test]
    fn outcome_fields_default_when_absent() {
        let outcome: ScriptOutcome = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(
            outcome,
            ScriptOutcome {
                ok: true,
                ..ScriptOutcome::default()
            }
        );

        let rejected: ScriptOutcome = serde_json::from_str(
            r#"{"ok":false,"name":"NotAllowedError","message":"play() failed"}"#,
        )
        .unwrap();
        assert_eq!(rejected.name, "NotAllowedError");
        assert!(!rejected.confirmed);
    }
}
