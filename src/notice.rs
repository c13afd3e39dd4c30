//! User-facing notices emitted by cart operations.
//!
//! `Notifier` is the contract for whatever displays them (a toast area, a
//! terminal, a log). The cart never formats UI itself.

use crate::catalog::ServiceId;
use serde::Serialize;

const REJECTED_MESSAGE: &str = "Vous devez d'abord sélectionner un service de base";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    Added {
        id: ServiceId,
        name: String,
    },
    Removed {
        id: ServiceId,
        name: String,
    },
    Rejected {
        id: ServiceId,
        name: String,
        required: Vec<ServiceId>,
    },
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::Added { .. } | Notice::Removed { .. } => NoticeLevel::Success,
            Notice::Rejected { .. } => NoticeLevel::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::Added { name, .. } => format!("{name} ajouté au panier"),
            Notice::Removed { name, .. } => format!("{name} retiré du panier"),
            Notice::Rejected { .. } => REJECTED_MESSAGE.to_string(),
        }
    }

    pub fn service_id(&self) -> &ServiceId {
        match self {
            Notice::Added { id, .. } | Notice::Removed { id, .. } | Notice::Rejected { id, .. } => {
                id
            }
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices in order; handy for tests and batch output.
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Routes notices to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notice: Notice) {
        let message = notice.message();
        match notice.level() {
            NoticeLevel::Success => {
                tracing::info!(service = %notice.service_id(), "{message}")
            }
            NoticeLevel::Error => {
                tracing::warn!(service = %notice.service_id(), "{message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_cart_wording() {
        let added = Notice::Added {
            id: ServiceId::new("blog"),
            name: "Blog Markdown".into(),
        };
        assert_eq!(added.message(), "Blog Markdown ajouté au panier");
        assert_eq!(added.level(), NoticeLevel::Success);

        let removed = Notice::Removed {
            id: ServiceId::new("blog"),
            name: "Blog Markdown".into(),
        };
        assert_eq!(removed.message(), "Blog Markdown retiré du panier");

        let rejected = Notice::Rejected {
            id: ServiceId::new("blog"),
            name: "Blog Markdown".into(),
            required: vec![ServiceId::new("site-vitrine")],
        };
        assert_eq!(rejected.level(), NoticeLevel::Error);
        assert_eq!(rejected.message(), REJECTED_MESSAGE);
        assert_eq!(rejected.service_id().as_str(), "blog");
    }

    #[test]
    fn notices_serialize_with_kind_tag() {
        let notice = Notice::Added {
            id: ServiceId::new("blog"),
            name: "Blog".into(),
        };
        let value = serde_json::to_value(&notice).unwrap();
        assert_eq!(value["kind"], "added");
        assert_eq!(value["id"], "blog");
    }

    #[test]
    fn vec_notifier_keeps_order() {
        let mut sink: Vec<Notice> = Vec::new();
        sink.notify(Notice::Added {
            id: ServiceId::new("a"),
            name: "A".into(),
        });
        sink.notify(Notice::Removed {
            id: ServiceId::new("a"),
            name: "A".into(),
        });
        assert_eq!(sink.len(), 2);
        assert!(matches!(sink[1], Notice::Removed { .. }));
    }
}
