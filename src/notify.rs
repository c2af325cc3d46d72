//! Transient success/error banners

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// How long a banner stays up
pub const BANNER_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub id: u64,
    pub text: String,
    pub success: bool,
    pub raised_at: DateTime<Local>,
    expires_at: Instant,
}

impl Banner {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
struct Inner {
    ttl: Duration,
    next_id: u64,
    banners: Vec<Banner>,
    subscribers: Vec<mpsc::UnboundedSender<Banner>>,
}

/// Shared handle to the banner stack.
///
/// Banners stack without queuing or deduplication and each one expires on
/// its own clock.
#[derive(Debug, Clone)]
pub struct Notifier {
    inner: Rc<RefCell<Inner>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::with_ttl(BANNER_TTL)
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                ttl,
                next_id: 0,
                banners: Vec::new(),
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn notify(&self, text: impl Into<String>, success: bool) {
        let text = text.into();
        if success {
            tracing::info!("{}", text);
        } else {
            tracing::warn!("{}", text);
        }

        let mut inner = self.inner.borrow_mut();
        let banner = Banner {
            id: inner.next_id,
            text,
            success,
            raised_at: Local::now(),
            expires_at: Instant::now() + inner.ttl,
        };
        inner.next_id += 1;

        inner.subscribers.retain(|tx| tx.send(banner.clone()).is_ok());
        inner.banners.push(banner);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(text, true);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(text, false);
    }

    /// Banners still on display; expired ones are removed
    pub fn banners(&self) -> Vec<Banner> {
        let now = Instant::now();
        let mut inner = self.inner.borrow_mut();
        inner.banners.retain(|b| !b.is_expired(now));
        inner.banners.clone()
    }

    /// Every banner raised from now on, as it is raised
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<Banner> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.borrow_mut().subscribers.push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_banners_expire_after_ttl() {
        let notifier = Notifier::new();
        notifier.success("File copied");
        assert_eq!(notifier.banners().len(), 1);

        tokio::time::advance(Duration::from_millis(2900)).await;
        assert_eq!(notifier.banners().len(), 1);

        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(notifier.banners().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_banners_expire_independently() {
        let notifier = Notifier::new();
        notifier.success("first");
        tokio::time::advance(Duration::from_secs(2)).await;
        notifier.error("second");

        tokio::time::advance(Duration::from_millis(1500)).await;
        let banners = notifier.banners();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].text, "second");
        assert!(!banners[0].success);
    }

    #[test]
    fn test_no_deduplication() {
        let notifier = Notifier::new();
        notifier.error("Delete failed");
        notifier.error("Delete failed");
        let banners = notifier.banners();
        assert_eq!(banners.len(), 2);
        assert_ne!(banners[0].id, banners[1].id);
    }

    #[test]
    fn test_subscribers_receive_banners() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        notifier.success("Folder created");

        let banner = rx.try_recv().unwrap();
        assert_eq!(banner.text, "Folder created");
        assert!(banner.success);
    }

    #[test]
    fn test_dropped_subscriber_is_forgotten() {
        let notifier = Notifier::new();
        drop(notifier.subscribe());
        notifier.success("ok");
        assert!(notifier.inner.borrow().subscribers.is_empty());
    }
}
