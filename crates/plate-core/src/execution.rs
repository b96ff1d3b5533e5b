use std::str::Utf8Error;

/// One occurrence of a template being rendered through a [`Recorder`](crate::recorder::Recorder).
#[derive(Debug, Clone, PartialEq)]
pub struct Execution<C, E> {
    /// Bytes the wrapped template wrote during this call, up to the point of failure.
    pub output: Vec<u8>,
    /// Context the call was made with.
    pub context: C,
    /// Failure returned by the wrapped template, if any.
    pub error: Option<E>,
    /// Sub-template name for `render_named` calls; `None` for `render`.
    pub template: Option<String>,
}

impl<C, E> Execution<C, E> {
    /// Whether the wrapped template returned a failure.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// The captured output as UTF-8.
    pub fn output_str(&self) -> std::result::Result<&str, Utf8Error> {
        std::str::from_utf8(&self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_failure() {
        let ok: Execution<&str, String> = Execution {
            output: b"Hi".to_vec(),
            context: "John",
            error: None,
            template: None,
        };
        let failed = Execution {
            error: Some("boom".to_string()),
            ..ok.clone()
        };
        assert!(!ok.is_failure());
        assert!(failed.is_failure());
    }

    #[test]
    fn test_output_str_rejects_invalid_utf8() {
        let exec: Execution<(), ()> = Execution {
            output: vec![0xff, 0xfe],
            context: (),
            error: None,
            template: None,
        };
        assert!(exec.output_str().is_err());
    }
}
