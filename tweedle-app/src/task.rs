//! The post task as a build step sees it.
//!
//! Configuration phase: [`build_from_config`] registers every enabled client.
//! Action phase: [`PostTweetTask::run`] opens the ready latch and sends.
use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::sync::Arc;
use tweedle_config::TweedleConfig;
use tweedle_dispatch::{ClientFactory, PostDispatcher, StatusUpdate, make_message};

/// Arguments of `tweedle post`.
#[derive(Debug, Clone, Args)]
pub struct PostArgs {
    pub message: String,
    /// Fail the step on any send error, overriding `send_quietly`.
    #[arg(long)]
    pub loud: bool,
    /// Status id to reply to.
    #[arg(long)]
    pub reply_to: Option<u64>,
    #[arg(long)]
    pub sensitive: bool,
}

impl PostArgs {
    pub fn to_update(&self) -> StatusUpdate {
        let update = make_message(self.message.clone()).possibly_sensitive(self.sensitive);
        match self.reply_to {
            Some(status_id) => update.in_reply_to(status_id),
            None => update,
        }
    }
}

pub struct PostTweetTask {
    dispatcher: PostDispatcher,
}

impl PostTweetTask {
    pub fn new(factory: Arc<dyn ClientFactory>, send_quietly: bool) -> Self {
        Self {
            dispatcher: PostDispatcher::new(factory).with_quiet(send_quietly),
        }
    }

    pub fn dispatcher(&self) -> &PostDispatcher {
        &self.dispatcher
    }

    /// End of the configuration phase.
    pub fn apply(&mut self) {
        self.dispatcher.mark_ready();
        tracing::debug!(clients = self.dispatcher.len(), "post task applied");
    }

    pub async fn run(&mut self, update: StatusUpdate) -> Result<()> {
        self.apply();
        self.dispatcher.send_update(update).await?;
        Ok(())
    }

    /// `tweedle post`: `--loud` wins over `send_quietly`.
    pub async fn post(&mut self, args: &PostArgs) -> Result<()> {
        if args.loud {
            self.dispatcher.set_quiet(false);
        }
        self.run(args.to_update()).await
    }

    /// `tweedle check`: one resolved account name per line, nothing posted.
    pub fn check<W: Write>(&self, out: &mut W) -> Result<()> {
        for name in self.dispatcher.client_names() {
            writeln!(out, "{name}")?;
        }
        Ok(())
    }
}

pub async fn build_from_config(
    cfg: &TweedleConfig,
    factory: Arc<dyn ClientFactory>,
) -> Result<PostTweetTask> {
    let mut task = PostTweetTask::new(factory, cfg.send_quietly);

    for spec in cfg.enabled_clients() {
        task.dispatcher
            .add_client_with_credentials(
                &spec.api_key,
                &spec.api_key_secret,
                &spec.access_token,
                &spec.access_token_secret,
            )
            .await
            .with_context(|| format!("failed to add client `{}`", spec.id))?;
    }

    if task.dispatcher.is_empty() {
        tracing::warn!("no clients configured; sends will fail");
    }
    tracing::debug!(
        clients = task.dispatcher.len(),
        send_quietly = cfg.send_quietly,
        "post task configured"
    );
    Ok(task)
}
