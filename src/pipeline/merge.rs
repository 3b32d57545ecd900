//! Combining configured and call-time middleware.

use std::str::FromStr;

use crate::middleware::SharedMiddleware;
use crate::Error;

/// How call-time middleware combines with the configured list.
///
/// **The default is [`MergeStrategy::Replace`].** Supplying any call-time
/// middleware without choosing a strategy drops every configured middleware
/// for that call, including ones that install headers or logging. Pick
/// [`MergeStrategy::Append`] or [`MergeStrategy::Prepend`] to keep them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergeStrategy {
    /// Call-time middleware only.
    #[default]
    Replace,
    /// Configured middleware, then call-time middleware.
    Append,
    /// Call-time middleware, then configured middleware.
    Prepend,
}

impl FromStr for MergeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(MergeStrategy::Replace),
            "append" => Ok(MergeStrategy::Append),
            "prepend" => Ok(MergeStrategy::Prepend),
            other => Err(Error::configuration(format!(
                "unrecognized middleware merge strategy '{}'",
                other
            ))),
        }
    }
}

/// Build the call-scoped middleware list.
///
/// Always returns a fresh `Vec`; `configured` is never touched. Without a
/// call-time list the configured list is used regardless of `strategy`.
pub fn merge_middleware(
    configured: &[SharedMiddleware],
    call_time: Option<&[SharedMiddleware]>,
    strategy: MergeStrategy,
) -> Vec<SharedMiddleware> {
    let Some(call_time) = call_time else {
        return configured.to_vec();
    };
    match strategy {
        MergeStrategy::Replace => call_time.to_vec(),
        MergeStrategy::Append => configured.iter().chain(call_time).cloned().collect(),
        MergeStrategy::Prepend => call_time.iter().chain(configured).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Middleware;
    use std::sync::Arc;

    struct Named(&'static str);

    impl Middleware for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn list(names: &[&'static str]) -> Vec<SharedMiddleware> {
        names
            .iter()
            .map(|n| Arc::new(Named(n)) as SharedMiddleware)
            .collect()
    }

    fn names(mws: &[SharedMiddleware]) -> Vec<&str> {
        mws.iter().map(|m| m.name()).collect()
    }

    #[test]
    fn strategies_order_lists() {
        let configured = list(&["a", "b"]);
        let call = list(&["c"]);

        let appended = merge_middleware(&configured, Some(&call), MergeStrategy::Append);
        assert_eq!(names(&appended), ["a", "b", "c"]);

        let prepended = merge_middleware(&configured, Some(&call), MergeStrategy::Prepend);
        assert_eq!(names(&prepended), ["c", "a", "b"]);

        let replaced = merge_middleware(&configured, Some(&call), MergeStrategy::default());
        assert_eq!(names(&replaced), ["c"]);
    }

    #[test]
    fn absent_call_time_list_keeps_configured() {
        let configured = list(&["a", "b"]);
        for strategy in [MergeStrategy::Replace, MergeStrategy::Append, MergeStrategy::Prepend] {
            assert_eq!(names(&merge_middleware(&configured, None, strategy)), ["a", "b"]);
        }
    }

    #[test]
    fn empty_call_time_list_with_replace_clears() {
        let configured = list(&["a"]);
        assert!(merge_middleware(&configured, Some(&[]), MergeStrategy::Replace).is_empty());
    }

    #[test]
    fn parses_strategy_names() {
        assert_eq!("Append".parse::<MergeStrategy>().unwrap(), MergeStrategy::Append);
        assert_eq!(" prepend ".parse::<MergeStrategy>().unwrap(), MergeStrategy::Prepend);
        assert!("merge".parse::<MergeStrategy>().is_err());
    }
}
