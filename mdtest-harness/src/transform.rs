//! The transformation capability under test.
//!
//! The harness treats the Markdown engine as an opaque, deterministic, pure
//! function. Engines that can fail report a [`TransformFault`]; the runner
//! never catches it per case.

use thiserror::Error;

/// A fault raised by the engine for a given input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transform failed: {message}")]
pub struct TransformFault {
    pub message: String,
}

impl TransformFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Text-to-text transformation engine.
pub trait Transformer {
    fn transform(&self, input: &str) -> Result<String, TransformFault>;
}

impl<T: Transformer + ?Sized> Transformer for &T {
    fn transform(&self, input: &str) -> Result<String, TransformFault> {
        (**self).transform(input)
    }
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn transform(&self, input: &str) -> Result<String, TransformFault> {
        (**self).transform(input)
    }
}

/// Passthrough engine; output equals input.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Transformer for Identity {
    fn transform(&self, input: &str) -> Result<String, TransformFault> {
        Ok(input.to_string())
    }
}

/// Adapter for an infallible function, see [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnTransformer<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnTransformer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnTransformer")
    }
}

impl<F> Transformer for FnTransformer<F>
where
    F: Fn(&str) -> String,
{
    fn transform(&self, input: &str) -> Result<String, TransformFault> {
        Ok((self.f)(input))
    }
}

/// Wrap an infallible `Fn(&str) -> String` as a [`Transformer`].
pub fn from_fn<F>(f: F) -> FnTransformer<F>
where
    F: Fn(&str) -> String,
{
    FnTransformer { f }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFails;

    impl Transformer for AlwaysFails {
        fn transform(&self, input: &str) -> Result<String, TransformFault> {
            Err(TransformFault::new(format!("cannot parse {} bytes", input.len())))
        }
    }

    #[test]
    fn test_identity() {
        assert_eq!(Identity.transform("# Hello\n").unwrap(), "# Hello\n");
        assert_eq!(Identity.transform("").unwrap(), "");
    }

    #[test]
    fn test_from_fn() {
        let upper = from_fn(|s| s.to_uppercase());
        assert_eq!(upper.transform("abc").unwrap(), "ABC");
        assert_eq!(format!("{:?}", upper), "FnTransformer");
    }

    #[test]
    fn test_fault_display() {
        let err = AlwaysFails.transform("xyz").unwrap_err();
        assert_eq!(err.to_string(), "transform failed: cannot parse 3 bytes");
    }

    #[test]
    fn test_reference_and_box_forwarding() {
        let boxed: Box<dyn Transformer> = Box::new(Identity);
        assert_eq!(boxed.transform("a").unwrap(), "a");

        let by_ref = &Identity;
        assert_eq!(by_ref.transform("b").unwrap(), "b");
    }
}
