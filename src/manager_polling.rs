use std::sync::Arc;
use log::debug;
use tokio::time::{interval, Duration, MissedTickBehavior};
use crate::manager_alarm::{AlarmSource, AlarmStore};

/// Alarm polling loop
///
/// Every tick spawns its own refresh, so a slow response never holds back the
/// next poll. The store discards responses that arrive after a newer one.
///
/// # Arguments
///
/// * 'store' - the alarm store to keep refreshed
/// * 'interval_secs' - seconds between polls
pub async fn run_alarm_polling<S: AlarmSource + 'static>(store: Arc<AlarmStore<S>>, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let store = store.clone();
        tokio::spawn(async move {
            if let Ok(alarms) = store.refresh().await {
                debug!("polled {} alarms", alarms.len());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager_alarm::tests::{alarm, fetch_count, FakeSource};

    #[tokio::test]
    async fn polls_repeatedly() {
        let store = Arc::new(AlarmStore::new(FakeSource::with_alarms(vec![alarm(1, 7, 0, true)])));
        let poller = tokio::spawn(run_alarm_polling(store.clone(), 1));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        poller.abort();

        assert!(fetch_count(&store) >= 2);
        assert_eq!(store.alarms(), vec![alarm(1, 7, 0, true)]);
    }
}
