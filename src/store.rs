use crate::models::HistoryEntry;
use chrono::Utc;
use std::collections::VecDeque;
use tokio::sync::RwLock;

pub const DEFAULT_RECENT_COUNT: usize = 50;

/// Bounded in-memory history of formatted messages.
///
/// Every open stream sees every message, so only the stream whose owner
/// wrote a message should append it.
pub struct ChatLog {
    limit: usize,
    entries: RwLock<VecDeque<HistoryEntry>>,
}

impl ChatLog {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            entries: RwLock::new(VecDeque::new()),
        }
    }

    pub async fn append(&self, author: &str, html: &str) {
        let mut entries = self.entries.write().await;
        if entries.len() == self.limit {
            entries.pop_front();
        }
        entries.push_back(HistoryEntry {
            author: author.to_string(),
            html: html.to_string(),
            posted_at: Utc::now(),
        });
    }

    /// Up to `count` most recent entries, oldest first.
    pub async fn recent(&self, count: usize) -> Vec<HistoryEntry> {
        let entries = self.entries.read().await;
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_recent() {
        let log = ChatLog::new(10);
        assert!(log.is_empty().await);

        log.append("alice", "<b>alice</b>: one").await;
        log.append("bob", "<b>bob</b>: two").await;
        log.append("alice", "<b>alice</b>: three").await;

        assert_eq!(log.len().await, 3);
        let recent = log.recent(2).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].html, "<b>bob</b>: two");
        assert_eq!(recent[1].author, "alice");
        assert!(recent[0].posted_at <= recent[1].posted_at);
    }

    #[tokio::test]
    async fn test_oldest_entries_are_evicted() {
        let log = ChatLog::new(2);
        for i in 0..4 {
            log.append("alice", &format!("msg {i}")).await;
        }

        let all = log.recent(usize::MAX).await;
        let html: Vec<&str> = all.iter().map(|e| e.html.as_str()).collect();
        assert_eq!(html, vec!["msg 2", "msg 3"]);
    }

    #[tokio::test]
    async fn test_recent_zero() {
        let log = ChatLog::new(4);
        log.append("alice", "x").await;
        assert!(log.recent(0).await.is_empty());
    }
}
