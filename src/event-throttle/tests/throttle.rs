use std::sync::{Arc, Mutex};
use std::time::Duration;

use event_throttle::{throttle, ThrottleError, ThrottleWindow, Throttled};
use tokio::time::Instant;

type Executions = Arc<Mutex<Vec<(Duration, u32)>>>;

fn recorded(window: Duration) -> (Throttled<(), u32>, Executions) {
    let start = Instant::now();
    let executions: Executions = Arc::default();
    let sink = Arc::clone(&executions);
    let throttled = throttle(
        move |(), value: u32| sink.lock().unwrap().push((start.elapsed(), value)),
        window,
    )
    .unwrap();
    (throttled, executions)
}

fn at(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[tokio::test(start_paused = true)]
async fn scenario_leading_trailing_and_fresh_window() {
    let start = Instant::now();
    let (throttled, executions) = recorded(at(100));

    throttled.invoke(1); // A at t=0
    tokio::time::sleep_until(start + at(30)).await;
    throttled.invoke(2); // B at t=30
    assert_eq!(throttled.pending_fires_at(), Some(start + at(100)));
    tokio::time::sleep_until(start + at(60)).await;
    throttled.invoke(3); // C at t=60
    assert_eq!(throttled.pending_fires_at(), Some(start + at(100)));

    tokio::time::sleep_until(start + at(150)).await;
    // Only 50ms have passed since the trailing execution at t=100.
    throttled.invoke(4); // D at t=150
    let fires_at = throttled.pending_fires_at().unwrap();
    assert!(fires_at >= start + at(200) && fires_at < start + at(205));

    tokio::time::sleep_until(start + at(300)).await;
    throttled.invoke(5); // E at t=300, a fresh window

    let executions = executions.lock().unwrap().clone();
    let values: Vec<u32> = executions.iter().map(|(_, value)| *value).collect();
    assert_eq!(values, vec![1, 3, 4, 5]);
    assert_eq!(executions[0].0, at(0));
    assert!(executions[1].0 >= at(100) && executions[1].0 < at(105));
    assert!(executions[2].0 >= at(200) && executions[2].0 < at(205));
    assert_eq!(executions[3].0, at(300));
}

#[tokio::test(start_paused = true)]
async fn executions_never_closer_than_window() {
    let window = at(50);
    let (throttled, executions) = recorded(window);

    for value in 0..150 {
        throttled.invoke(value);
        assert!(throttled.pending_fires_at().map_or(true, |fires_at| {
            fires_at <= Instant::now() + window
        }));
        tokio::time::sleep(at(7)).await;
    }
    tokio::time::sleep(window * 2).await;

    let executions = executions.lock().unwrap().clone();
    assert!(executions.len() > 1);
    for pair in executions.windows(2) {
        assert!(
            pair[1].0 - pair[0].0 >= window,
            "executions at {:?} and {:?} are closer than {window:?}",
            pair[0].0,
            pair[1].0
        );
    }
    assert_eq!(executions.last().map(|(_, value)| *value), Some(149));
}

#[tokio::test(start_paused = true)]
async fn burst_yields_exactly_one_trailing_execution() {
    let (throttled, executions) = recorded(at(100));

    throttled.invoke(0);
    for value in 1..=20 {
        throttled.invoke(value);
        assert!(throttled.is_pending());
    }
    tokio::time::sleep(at(500)).await;

    let values: Vec<u32> = executions.lock().unwrap().iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![0, 20]);
    assert!(!throttled.is_pending());
}

#[tokio::test(start_paused = true)]
async fn clones_share_state() {
    let (throttled, executions) = recorded(at(100));
    let clone = throttled.clone();

    throttled.invoke(1);
    clone.invoke(2);

    assert!(throttled.is_pending());
    assert_eq!(throttled.last_run_at(), clone.last_run_at());
    tokio::time::sleep(at(150)).await;
    assert_eq!(executions.lock().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn zero_window_is_unthrottled() {
    let (throttled, executions) = recorded(Duration::ZERO);

    for value in 0..10 {
        throttled.invoke(value);
        assert!(!throttled.is_pending());
    }

    assert_eq!(executions.lock().unwrap().len(), 10);
}

#[tokio::test]
async fn invalid_windows_fail_at_wrap_time() {
    assert!(matches!(
        throttle(|(), ()| {}, -1_i64),
        Err(ThrottleError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        throttle(|(), ()| {}, f64::NAN),
        Err(ThrottleError::InvalidConfiguration { .. })
    ));
    assert!("often".parse::<ThrottleWindow>().is_err());
}

#[test]
fn explicit_runtime_handle_works_outside_async_context() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let executions: Arc<Mutex<Vec<u32>>> = Arc::default();
    let sink = Arc::clone(&executions);
    let throttled = Throttled::with_runtime(
        move |(), value: u32| sink.lock().unwrap().push(value),
        ThrottleWindow::from_millis(10).unwrap(),
        runtime.handle().clone(),
    );

    throttled.invoke(1);
    throttled.invoke(2);
    runtime.block_on(async { tokio::time::sleep(at(30)).await });

    assert_eq!(*executions.lock().unwrap(), vec![1, 2]);
}
