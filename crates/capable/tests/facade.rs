use capable::center::NotificationReceiverExt;
use capable::domain::config::CapableConfig;
use capable::domain::events::SettingChanged;
use capable::domain::features::{Feature, FeatureSet};
use capable::statuses::StatusesError;
use capable::{Capable, CapableError};
use std::time::Duration;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

fn config(edit: impl FnOnce(&mut CapableConfig)) -> CapableConfig {
    let mut config = CapableConfig::default();
    edit(&mut config);
    config
}

#[tokio::test]
async fn set_status_reaches_subscribers() {
    let capable = Capable::from_config(&CapableConfig::default());
    let mut posted = capable.subscribe().unwrap();
    let _observer = capable.start().unwrap();

    assert_eq!(capable.set_status(Feature::BoldText, "enabled").unwrap(), 1);
    let first = timeout(WAIT, posted.next_notification()).await.unwrap().unwrap();
    assert_eq!(first.to_string(), "bold_text=enabled");

    assert_eq!(capable.set_enabled(Feature::BoldText, false).unwrap(), 1);
    let second = timeout(WAIT, posted.next_notification()).await.unwrap().unwrap();
    assert_eq!(second.to_string(), "bold_text=disabled");
}

#[tokio::test]
async fn initial_statuses_come_from_config() {
    let capable = Capable::from_config(&config(|c| {
        c.statuses.initial.insert(Feature::LargerText, "large".to_owned());
    }));
    let mut posted = capable.subscribe().unwrap();

    assert_eq!(capable.statuses().len(), 1);
    assert!(capable.notifier().post_current_status(Feature::LargerText));

    let received = timeout(WAIT, posted.next_notification()).await.unwrap().unwrap();
    assert_eq!(received.status, "large");
}

#[tokio::test]
async fn set_status_without_observer_is_not_an_error() {
    let capable = Capable::from_config(&CapableConfig::default());

    assert_eq!(capable.set_status(Feature::Grayscale, "enabled").unwrap(), 0);
    assert_eq!(capable.center().observer_count::<SettingChanged>(), 0);
}

#[test]
fn untracked_feature_is_rejected() {
    let capable = Capable::from_config(&config(|c| c.statuses.tracked = FeatureSet::VOICE_OVER));

    let err = capable.set_status(Feature::SwitchControl, "enabled").unwrap_err();
    assert!(matches!(err, CapableError::Statuses { source: StatusesError::Untracked { .. }, .. }));
}

#[test]
fn larger_text_is_not_boolean() {
    let capable = Capable::from_config(&CapableConfig::default());

    let err = capable.set_enabled(Feature::LargerText, true).unwrap_err();
    assert!(matches!(err, CapableError::Statuses { source: StatusesError::NotBoolean { .. }, .. }));
}

#[tokio::test]
async fn disabled_notifications_stay_silent() {
    let capable = Capable::from_config(&config(|c| c.notifications.enabled = false));
    let mut posted = capable.subscribe().unwrap();
    let _observer = capable.start().unwrap();

    capable.set_status(Feature::VoiceOver, "enabled").unwrap();
    capable.post_notification(Feature::VoiceOver, "enabled");

    assert!(timeout(Duration::from_millis(100), posted.next_notification()).await.is_err());
    assert_eq!(capable.statuses().is_enabled(Feature::VoiceOver), Some(true));
}

#[tokio::test]
async fn shutdown_stops_observer() {
    let capable = Capable::from_config(&CapableConfig::default());
    let observer = capable.start().unwrap();

    assert_eq!(capable.shutdown(), 1);
    timeout(WAIT, observer.join()).await.unwrap().unwrap();
}

#[tokio::test]
async fn zero_observer_capacity_fails_to_start() {
    let capable = Capable::from_config(&config(|c| c.notifications.observer_capacity = 0));

    let err = capable.start().unwrap_err();
    assert!(matches!(err, CapableError::Notifications { .. }));
    assert!(err.to_string().starts_with("Notifications error (Starting settings observer)"));
}

#[tokio::test]
async fn burst_larger_than_observer_capacity_is_not_lost() {
    let capable = Capable::from_config(&config(|c| c.notifications.observer_capacity = 8));
    let mut posted = capable.subscribe().unwrap();
    let mut observer = capable.start().unwrap();

    let mut printed = Vec::new();
    for round in 1..=100u64 {
        capable.set_status(Feature::VoiceOver, format!("s{round}")).unwrap();
        assert!(timeout(WAIT, observer.wait_handled(round)).await.unwrap());
        while let Ok(notification) = posted.try_recv() {
            printed.push(notification.to_string());
        }
    }

    assert!(capable.close_settings());
    timeout(WAIT, observer.join()).await.unwrap().unwrap();

    assert_eq!(printed.len(), 100);
    assert_eq!(printed.first().map(String::as_str), Some("voice_over=s1"));
    assert_eq!(printed.last().map(String::as_str), Some("voice_over=s100"));
}
