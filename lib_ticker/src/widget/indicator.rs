//! # Indicator State
//!
//! The indicator is the only part of a widget that changes after creation.
//! Its value lives in a `tokio::sync::watch` channel so an enrichment task can
//! publish the outcome while callers either poll the current snapshot or await
//! settlement.

use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::enrichment::Sentiment;

/// Class applied while a lookup is in flight.
pub const CLASS_LOADING: &str = "ajax-loading";
/// Class applied once a lookup succeeded.
pub const CLASS_SUCCESS: &str = "ajax-success";
/// Class applied once a lookup failed.
pub const CLASS_FAIL: &str = "ajax-fail";

/// Enrichment status of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorState {
    /// Enrichment is off; the indicator is an empty placeholder.
    #[default]
    Disabled,
    /// A lookup has been issued and not yet resolved.
    Loading,
    /// The lookup resolved with a sentiment.
    Success,
    /// The lookup failed.
    Fail,
}

/// Current value of an indicator sub-node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Indicator {
    state: IndicatorState,
    text: String,
    category: Option<String>,
    detached: bool,
}

impl Indicator {
    /// The enrichment status.
    pub fn state(&self) -> IndicatorState {
        self.state
    }

    /// The sentiment label; empty unless the state is `Success`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The sentiment category taken from the response, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Whether the indicator was removed from its container.
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Visual classes for the current state, in render order.
    pub fn classes(&self) -> Vec<String> {
        match self.state {
            IndicatorState::Disabled => Vec::new(),
            IndicatorState::Loading => vec![CLASS_LOADING.to_string()],
            IndicatorState::Fail => vec![CLASS_FAIL.to_string()],
            IndicatorState::Success => {
                let mut classes = vec![CLASS_SUCCESS.to_string()];
                if let Some(category) = &self.category {
                    for class in category.split_whitespace() {
                        if !classes.iter().any(|c| c == class) {
                            classes.push(class.to_string());
                        }
                    }
                }
                classes
            }
        }
    }

    /// Serializable view of the indicator.
    pub fn snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            state: self.state,
            text: self.text.clone(),
            classes: self.classes(),
        }
    }
}

/// JSON form of an indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Enrichment status.
    pub state: IndicatorState,
    /// Sentiment label.
    pub text: String,
    /// Visual classes.
    pub classes: Vec<String>,
}

/// Shared handle to one widget's indicator.
///
/// Cloning the handle shares the same indicator. Transitions follow
/// `Disabled -> Loading -> (Success | Fail)` and resolve exactly once.
#[derive(Debug, Clone)]
pub struct IndicatorHandle {
    inner: Arc<watch::Sender<Indicator>>,
}

impl Default for IndicatorHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorHandle {
    /// A fresh indicator in state `Disabled`.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Indicator::default());
        Self { inner: Arc::new(tx) }
    }

    /// A copy of the current value.
    pub fn get(&self) -> Indicator {
        self.inner.borrow().clone()
    }

    /// The current state.
    pub fn state(&self) -> IndicatorState {
        self.inner.borrow().state
    }

    /// True when both handles point at the same indicator.
    pub fn ptr_eq(&self, other: &IndicatorHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// `Disabled -> Loading`. Returns false if the indicator already left
    /// `Disabled` or is detached.
    pub fn begin_loading(&self) -> bool {
        self.inner.send_if_modified(|ind| {
            if ind.state != IndicatorState::Disabled || ind.detached {
                return false;
            }
            ind.state = IndicatorState::Loading;
            true
        })
    }

    /// `Loading -> Success`, taking the label and category from `sentiment`.
    pub fn succeed(&self, sentiment: &Sentiment) -> bool {
        self.inner.send_if_modified(|ind| {
            if ind.state != IndicatorState::Loading || ind.detached {
                return false;
            }
            ind.state = IndicatorState::Success;
            ind.text = sentiment.label.clone();
            ind.category = sentiment
                .category
                .as_ref()
                .filter(|c| !c.trim().is_empty())
                .cloned();
            true
        })
    }

    /// `Loading -> Fail`. Text and category are cleared.
    pub fn fail(&self) -> bool {
        self.inner.send_if_modified(|ind| {
            if ind.state != IndicatorState::Loading || ind.detached {
                return false;
            }
            ind.state = IndicatorState::Fail;
            ind.text.clear();
            ind.category = None;
            true
        })
    }

    /// Marks the indicator as removed from its container. Pending lookups
    /// will not mutate it any more.
    pub(crate) fn detach(&self) {
        self.inner.send_if_modified(|ind| {
            let changed = !ind.detached;
            ind.detached = true;
            changed
        });
    }

    /// Clears the detached mark when the indicator is mounted again.
    pub(crate) fn attach(&self) {
        self.inner.send_if_modified(|ind| {
            let changed = ind.detached;
            ind.detached = false;
            changed
        });
    }

    /// Waits until the indicator is no longer `Loading` (or got detached)
    /// and returns its value at that point.
    pub async fn settled(&self) -> Indicator {
        let mut rx = self.inner.subscribe();
        let settled = match rx
            .wait_for(|ind| ind.state != IndicatorState::Loading || ind.detached)
            .await
        {
            Ok(ind) => (*ind).clone(),
            Err(_) => self.get(),
        };
        settled
    }

    /// A non-owning reference for tasks that must not keep the widget alive.
    pub fn downgrade(&self) -> WeakIndicator {
        WeakIndicator {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Non-owning counterpart of [`IndicatorHandle`].
#[derive(Debug, Clone)]
pub struct WeakIndicator {
    inner: Weak<watch::Sender<Indicator>>,
}

impl WeakIndicator {
    /// The handle, if any owner (widget or container) is still alive.
    pub fn upgrade(&self) -> Option<IndicatorHandle> {
        self.inner.upgrade().map(|inner| IndicatorHandle { inner })
    }
}
