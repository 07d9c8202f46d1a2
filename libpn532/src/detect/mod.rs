// libpn532-rs/libpn532/src/detect/mod.rs

//! Tag detection and polling on an initialized device.

pub mod options;

pub use options::WaitOptions;

use std::time::{Duration, Instant};

use log::debug;

use crate::constants::NTAG_GET_VERSION;
use crate::device::{Device, Initialized};
use crate::tag::{DetectedTag, type_from_version};
use crate::types::{BaudRate, TagType};
use crate::utils::CommandContext;
use crate::{Error, Result};

impl Device<Initialized> {
    /// One InListPassiveTarget at 106 kbps type A; the first tag found.
    pub fn detect_tag(&mut self) -> Result<DetectedTag> {
        let mut tags = self.detect_tags(1, BaudRate::TypeA106)?;
        // detect_tags never returns an empty list
        Ok(tags.remove(0))
    }

    /// One InListPassiveTarget for up to `max_tags` (1 or 2) tags.
    pub fn detect_tags(&mut self, max_tags: u8, baud_rate: BaudRate) -> Result<Vec<DetectedTag>> {
        options::validate_max_tags(max_tags)?;
        let ctx = self.context();
        self.ensure_sam_configured(&ctx)?;
        self.poll_once(max_tags, baud_rate, &ctx)
    }

    /// Poll every `opts.polling_period` until a tag passing the filters
    /// shows up. `Timeout` when the deadline passes first. Failed polls
    /// continue when the retry classifier accepts the error.
    pub fn wait_for_tag(&mut self, opts: &WaitOptions) -> Result<DetectedTag> {
        opts.validate()?;
        let ctx = self.context_until(opts.resolve_deadline(Instant::now()));
        self.ensure_sam_configured(&ctx)?;
        // same notion of "worth another try" as the retry wrapper
        let keep_polling = self.retry_config().classifier;

        let mut polls = 0u32;
        loop {
            ctx.check()?;
            polls += 1;
            match self.poll_once(opts.max_tags, opts.baud_rate, &ctx) {
                Ok(tags) => {
                    for tag in tags {
                        let tag = if opts.probe_ultralight {
                            self.probe_with(tag, &ctx)
                        } else {
                            tag
                        };
                        if tag.matches(opts.tag_type, opts.uid.as_deref()) {
                            debug!("poll {polls}: found {tag}");
                            return Ok(tag);
                        }
                        debug!("poll {polls}: {tag} filtered out");
                    }
                }
                Err(Error::NoTagDetected) => debug!("poll {polls}: no tag"),
                Err(err) if keep_polling(&err) => debug!("poll {polls}: {err}, continuing"),
                Err(err) => return Err(err),
            }
            ctx.check()?;
            ctx.sleep(opts.polling_period)?;
        }
    }

    /// `wait_for_tag` without filters.
    pub fn simple_poll(&mut self, timeout: Duration, polling_period: Duration) -> Result<DetectedTag> {
        let opts = WaitOptions::new()
            .with_timeout(timeout)
            .with_polling_period(polling_period);
        self.wait_for_tag(&opts)
    }

    /// Tell MIFARE Ultralight from NTAG with a GET_VERSION exchange. Tags
    /// that are not NTAG-looking, or do not answer, come back unchanged.
    pub fn classify_with_probe(&mut self, tag: DetectedTag) -> DetectedTag {
        let ctx = self.context();
        self.probe_with(tag, &ctx)
    }

    fn probe_with(&mut self, tag: DetectedTag, ctx: &CommandContext) -> DetectedTag {
        if tag.tag_type() != TagType::Ntag {
            return tag;
        }
        match self.data_exchange(tag.target_number(), &[NTAG_GET_VERSION], ctx) {
            Ok(version) => match type_from_version(&version) {
                Some(refined) => tag.with_tag_type(refined),
                None => tag,
            },
            Err(err) => {
                debug!("GET_VERSION probe failed for {tag}: {err}");
                tag
            }
        }
    }

    fn poll_once(
        &mut self,
        max_tags: u8,
        baud_rate: BaudRate,
        ctx: &CommandContext,
    ) -> Result<Vec<DetectedTag>> {
        let targets =
            self.list_targets(max_tags, baud_rate, baud_rate.default_initiator_data(), ctx)?;
        if targets.is_empty() {
            return Err(Error::NoTagDetected);
        }
        Ok(targets.iter().map(DetectedTag::from_target).collect())
    }
}
