use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::location::Coordinates;
use crate::service::schedule_service::ScheduleClient;
use crate::view::calendar_view::CellTimesUpdate;

#[derive(Clone)]
pub struct TimesBus {
    tx: mpsc::Sender<CellTimesUpdate>,
}

impl TimesBus {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<CellTimesUpdate>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    pub async fn emit(&self, update: CellTimesUpdate) {
        // Receiver gone means the session ended; the result has nowhere to go.
        let _ = self.tx.send(update).await;
    }
}

/// Spawns one independent fetch per cell. Results arrive on the bus in no
/// particular order, each tagged with `epoch`.
pub fn dispatch_time_fetches(
    client: Arc<dyn ScheduleClient>,
    bus: &TimesBus,
    coords: Coordinates,
    epoch: u64,
    plan: Vec<(u8, NaiveDate)>,
) -> Vec<JoinHandle<()>> {
    tracing::debug!(epoch, cells = plan.len(), %coords, "dispatching fasting time fetches");
    plan.into_iter()
        .map(|(day, date)| {
            let client = client.clone();
            let bus = bus.clone();
            tokio::spawn(async move {
                let times = client.fetch_times(date, coords).await;
                bus.emit(CellTimesUpdate { epoch, day, times }).await;
            })
        })
        .collect()
}
