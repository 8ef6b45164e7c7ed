use std::sync::Arc;
use std::time::Duration;
use vm_console::models::{seed_records, StatusFilter, VmId, VmRecord, VmStatus};
use vm_console::services::{Console, FilterView, QueryBar, VmRegistry};

fn ids(records: &[VmRecord]) -> Vec<u32> {
    records.iter().map(|vm| vm.id.0).collect()
}

#[tokio::test]
async fn test_end_to_end_console_workflow() {
    let registry = VmRegistry::with_restart_delay(seed_records(), Duration::from_millis(100));
    let nav = Arc::new(QueryBar::new("/azure/virtual-machines"));
    let mut console = Console::new(registry, nav.clone());

    // Seeded: 1 Running, 2 Stopped, 3 Running.
    console.set_filter(StatusFilter::Running);
    assert_eq!(ids(&console.visible().await), vec![1, 3]);
    assert_eq!(nav.href(), "/azure/virtual-machines?status=Running");

    console.stop(VmId(1)).await;
    assert_eq!(ids(&console.visible().await), vec![3]);

    console.start(VmId(2)).await;
    console.set_filter(StatusFilter::All);
    assert_eq!(ids(&console.visible().await), vec![1, 2, 3]);
    assert_eq!(nav.href(), "/azure/virtual-machines");

    let records = console.records().await;
    assert_eq!(records[1].id, VmId(2));
    assert_eq!(records[1].status, VmStatus::Running);
}

#[tokio::test]
async fn test_filter_adopted_from_the_external_parameter() {
    let registry = VmRegistry::with_restart_delay(seed_records(), Duration::from_millis(100));
    let nav = Arc::new(QueryBar::with_status("/azure/virtual-machines", "Stopped"));
    let console = Console::new(registry, nav);

    assert_eq!(console.filter(), StatusFilter::Stopped);
    assert_eq!(ids(&console.visible().await), vec![2]);
}

#[tokio::test]
async fn test_restart_hides_the_record_until_completion() {
    let registry = VmRegistry::with_restart_delay(seed_records(), Duration::from_millis(100));
    let nav = Arc::new(QueryBar::new("/azure/virtual-machines"));
    let mut console = Console::new(registry, nav);

    console.set_filter(StatusFilter::Running);
    console.restart(VmId(1)).await;

    // Mid-restart the record matches neither selectable filter.
    assert_eq!(ids(&console.visible().await), vec![3]);
    console.set_filter(StatusFilter::Stopped);
    assert_eq!(ids(&console.visible().await), vec![2]);
    console.set_filter(StatusFilter::All);
    assert_eq!(ids(&console.visible().await), vec![1, 2, 3]);

    tokio::time::sleep(Duration::from_millis(400)).await;
    console.set_filter(StatusFilter::Running);
    assert_eq!(ids(&console.visible().await), vec![1, 3]);
}

#[tokio::test]
async fn test_delete_during_restart_window_end_to_end() {
    let registry = VmRegistry::with_restart_delay(seed_records(), Duration::from_millis(100));
    let nav = Arc::new(QueryBar::new("/azure/virtual-machines"));
    let mut console = Console::new(registry, nav);

    console.restart(VmId(2)).await;
    console.delete(VmId(2)).await;

    console.set_filter(StatusFilter::All);
    assert_eq!(ids(&console.visible().await), vec![1, 3]);

    // Well past the original completion time the record is still gone.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(ids(&console.visible().await), vec![1, 3]);
}

#[tokio::test]
async fn test_derive_is_pure_and_order_preserving() {
    let records = seed_records();

    let all = FilterView::derive(&records, StatusFilter::All);
    assert_eq!(all, records);

    let running = FilterView::derive(&records, StatusFilter::Running);
    assert_eq!(ids(&running), vec![1, 3]);
    assert!(running.iter().all(|vm| vm.status == VmStatus::Running));
}

#[tokio::test]
async fn test_commands_only_touch_the_target_record() {
    let registry = VmRegistry::with_restart_delay(seed_records(), Duration::from_millis(100));
    let before = registry.list().await;

    registry.start(VmId(3)).await;
    let after = registry.list().await;

    for (b, a) in before.iter().zip(after.iter()) {
        if b.id != VmId(3) {
            assert_eq!(b, a);
        }
    }
}
