use crate::db::DriverError;
use crate::migration::MigrationFile;

use tokio::sync::mpsc;


/// Something that happened while a migration was processed.
#[derive(Debug)]
pub enum Event {
    /// Processing of this file has started.
    File(MigrationFile),
    Error(DriverError),
}

/// Sending half of a migration's progress channel.
///
/// Dropping it closes the channel, which is how the receiver learns the
/// migration is finished.
#[derive(Debug)]
pub struct Progress {
    tx: mpsc::Sender<Event>,
}

pub type ProgressReceiver = mpsc::Receiver<Event>;

/// Open a progress channel. Capacity is one event, so the driver waits for
/// the receiver before moving past each report.
pub fn channel() -> (Progress, ProgressReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (Progress { tx }, rx)
}

impl Progress {
    pub async fn announce(&self, file: &MigrationFile) {
        self.send(Event::File(file.clone())).await;
    }

    pub async fn fail(&self, error: DriverError) {
        tracing::error!("{error}");
        self.send(Event::Error(error)).await;
    }

    async fn send(&self, event: Event) {
        if let Err(mpsc::error::SendError(event)) = self.tx.send(event).await {
            tracing::warn!("Progress receiver dropped, discarding event: {event:?}");
        }
    }
}

/// Drain `rx` until the sending side closes it.
pub async fn collect(mut rx: ProgressReceiver) -> Vec<Event> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DriverErrorKind;
    use crate::migration::MigrationDirection;

    #[tokio::test]
    async fn dropping_progress_closes_the_channel() {
        let (progress, mut rx) = channel();
        let file = MigrationFile::with_content(1, "init", MigrationDirection::Up, "SELECT 1;");

        let producer = async move {
            progress.announce(&file).await;
            progress.fail(DriverError::new(DriverErrorKind::NotInitialized)).await;
        };
        let consumer = async {
            let mut seen = Vec::new();
            while let Some(event) = rx.recv().await {
                seen.push(event);
            }
            seen
        };
        let ((), seen) = tokio::join!(producer, consumer);

        assert_eq!(seen.len(), 2);
        assert!(matches!(&seen[0], Event::File(f) if f.version == 1));
        assert!(matches!(&seen[1], Event::Error(e) if matches!(e.kind, DriverErrorKind::NotInitialized)));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn sending_to_a_dropped_receiver_does_not_panic() {
        let (progress, rx) = channel();
        drop(rx);
        progress.fail(DriverError::new(DriverErrorKind::NotInitialized)).await;
    }
}
