use crate::command::parse_line;
use anyhow::{Context, bail};
use capable::Capable;
use capable::domain::events::FeatureStatusChanged;
use capable::notifications::SettingsObserver;
use std::fmt::Display;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};

type Posted = broadcast::Receiver<Arc<FeatureStatusChanged>>;

/// Applies `<feature> <status>` lines one at a time.
///
/// After each accepted update the session waits until the observer handled the
/// setting change, then writes whatever was posted. Nothing queues up, so no
/// status is dropped however fast the input arrives.
pub(crate) struct Session<O, E> {
    capable: Capable,
    observer: SettingsObserver,
    posted: Posted,
    raised: u64,
    out: O,
    err: E,
}

impl<O, E> Session<O, E>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    /// Subscribes to posted statuses and starts the settings observer.
    pub(crate) fn start(capable: Capable, out: O, err: E) -> anyhow::Result<Self> {
        let posted = capable.subscribe()?;
        let observer = capable.start()?;
        Ok(Self { capable, observer, posted, raised: 0, out, err })
    }

    /// Consumes `input` to its end, then shuts the pipeline down in order.
    pub(crate) async fn run<R>(mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        info!("Reading '<feature> <status>' lines");
        while let Some(line) = lines.next_line().await.context("Reading input")? {
            self.apply(&line).await?;
        }
        info!(updates = self.raised, "End of input");

        self.finish().await
    }

    async fn apply(&mut self, line: &str) -> anyhow::Result<()> {
        let update = match parse_line(line) {
            Ok(Some(update)) => update,
            Ok(None) => return Ok(()),
            Err(err) => {
                self.report(err).await?;
                return Ok(());
            },
        };

        match self.capable.set_status(update.feature, update.status) {
            Ok(0) => {},
            Ok(_) => {
                self.raised += 1;
                if !self.observer.wait_handled(self.raised).await {
                    bail!("Settings observer stopped unexpectedly");
                }
            },
            Err(err) => {
                warn!(error = %err, "Status update rejected");
                self.report(err).await?;
                return Ok(());
            },
        }

        write_posted(&mut self.posted, &mut self.out).await.context("Writing output")
    }

    async fn finish(self) -> anyhow::Result<()> {
        let Self { capable, observer, mut posted, mut out, .. } = self;

        capable.close_settings();
        observer.join().await.context("Settings observer failed")?;
        write_posted(&mut posted, &mut out).await.context("Writing output")?;
        capable.shutdown();

        Ok(())
    }

    async fn report(&mut self, err: impl Display) -> io::Result<()> {
        self.err.write_all(format!("{err}\n").as_bytes()).await?;
        self.err.flush().await
    }
}

async fn write_posted<O>(posted: &mut Posted, out: &mut O) -> io::Result<()>
where
    O: AsyncWrite + Unpin,
{
    loop {
        match posted.try_recv() {
            Ok(notification) => out.write_all(format!("{notification}\n").as_bytes()).await?,
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Output lagged; statuses were skipped");
            },
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    out.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use capable::domain::config::CapableConfig;
    use capable::domain::events::SettingChanged;
    use capable::domain::features::FeatureSet;
    use std::fmt::Write as _;

    async fn run(config: &CapableConfig, input: &str) -> (String, String) {
        let capable = Capable::from_config(config);
        let center = capable.center().clone();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        Session::start(capable, &mut out, &mut err)
            .unwrap()
            .run(input.as_bytes())
            .await
            .unwrap();

        assert_eq!(center.observer_count::<SettingChanged>(), 0, "observer must be gone");
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[tokio::test]
    async fn prints_each_accepted_update() {
        let input = "# initial state\nvoice_over enabled\n\nbold_text disabled\nlarger_text large\n";
        let (out, err) = run(&CapableConfig::default(), input).await;

        assert_eq!(out, "voice_over=enabled\nbold_text=disabled\nlarger_text=large\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn reports_bad_lines_and_keeps_going() {
        let mut config = CapableConfig::default();
        config.statuses.tracked = FeatureSet::VOICE_OVER;
        let input = "teleport on\nvoice_over\nswitch_control enabled\nvoice_over disabled\n";

        let (out, err) = run(&config, input).await;

        assert_eq!(out, "voice_over=disabled\n");
        assert_eq!(
            err,
            "Unknown feature: teleport\n\
             Malformed line (Expected '<feature> <status>'): 'voice_over'\n\
             Status error: Feature not tracked: switch_control\n"
        );
    }

    #[tokio::test]
    async fn input_far_beyond_observer_capacity_is_fully_printed() {
        let mut config = CapableConfig::default();
        config.notifications.observer_capacity = 4;
        let input = (1..=500).fold(String::new(), |mut input, n| {
            let _ = writeln!(input, "voice_over s{n}");
            input
        });

        let (out, _) = run(&config, &input).await;

        let expected = (1..=500).fold(String::new(), |mut out, n| {
            let _ = writeln!(out, "voice_over=s{n}");
            out
        });
        assert_eq!(out, expected);
    }

    #[tokio::test]
    async fn disabled_notifications_print_nothing() {
        let mut config = CapableConfig::default();
        config.notifications.enabled = false;

        let (out, err) = run(&config, "voice_over enabled\nbold_text enabled\n").await;

        assert!(out.is_empty());
        assert!(err.is_empty());
    }
}
