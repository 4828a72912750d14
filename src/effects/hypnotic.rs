use std::sync::{Mutex, PoisonError, RwLock};

use rayon::prelude::*;

use crate::effects::combine::{Combine, RowPass};
use crate::effects::config::EffectConfig;
use crate::effects::notify::{ConfigChange, Observers, SubscriptionId};
use crate::foundation::error::{HypnoticError, HypnoticResult};
use crate::frame::video::VideoFrame;
use crate::optics::mode::OpticMode;
use crate::optics::phase::Phase;
use crate::optics::quantize::clamp_threshold;
use crate::optics::table::PatternTable;

/// Row-level parallelism for a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowThreading {
    /// Combine rows on a dedicated `rayon` pool instead of the calling thread.
    pub parallel: bool,
    /// Pool size when `parallel` is set; `None` lets rayon decide.
    pub threads: Option<usize>,
}

/// Construction-time options, fixed for the lifetime of a [`HypnoticElement`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HypnoticOpts {
    /// Pixel combination policy.
    pub combine: Combine,
    /// Row threading.
    pub threading: RowThreading,
}

/// Counters for the stream processed so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectStats {
    /// Frames that went through the pattern pipeline.
    pub frames_processed: u64,
    /// Empty frames returned unchanged.
    pub frames_passed_through: u64,
    /// Pattern table (re)builds.
    pub table_rebuilds: u64,
}

#[derive(Default)]
struct StreamState {
    table: Option<PatternTable>,
    phase: Phase,
    stats: EffectStats,
}

/// The hypnotic video effect.
///
/// One input frame in, one newly allocated output frame out, with the same geometry, format and
/// timestamp. Properties can be changed from any thread while another thread calls
/// [`process`](Self::process); the host must not deliver frames to one instance concurrently.
pub struct HypnoticElement {
    opts: HypnoticOpts,
    config: RwLock<EffectConfig>,
    state: Mutex<StreamState>,
    observers: Observers,
    pool: Option<rayon::ThreadPool>,
}

impl HypnoticElement {
    /// Effect with default properties, [`Combine::Replace`] and serial rows.
    pub fn new() -> Self {
        Self {
            opts: HypnoticOpts::default(),
            config: RwLock::new(EffectConfig::default()),
            state: Mutex::new(StreamState::default()),
            observers: Observers::default(),
            pool: None,
        }
    }

    /// Effect with explicit options. Fails only if the row thread pool cannot be built.
    pub fn with_opts(opts: HypnoticOpts) -> HypnoticResult<Self> {
        let pool = if opts.threading.parallel {
            Some(build_thread_pool(opts.threading.threads)?)
        } else {
            None
        };
        Ok(Self {
            opts,
            pool,
            ..Self::new()
        })
    }

    /// Replace the initial properties. No notifications are sent.
    pub fn with_config(self, config: EffectConfig) -> Self {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        self
    }

    /// Construction-time options.
    pub fn opts(&self) -> &HypnoticOpts {
        &self.opts
    }

    /// Snapshot of the current properties.
    pub fn config(&self) -> EffectConfig {
        *self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current pattern geometry.
    pub fn mode(&self) -> OpticMode {
        self.config().mode
    }

    /// Current per-frame phase step.
    pub fn speed_inc(&self) -> i32 {
        self.config().speed_inc
    }

    /// Current threshold, as set (unclamped).
    pub fn threshold(&self) -> i32 {
        self.config().threshold
    }

    /// Set the mode from its property identifier.
    ///
    /// Unknown identifiers are ignored and the previous mode is kept. Returns whether the stored
    /// mode changed.
    pub fn set_mode(&self, mode: &str) -> bool {
        match mode.parse::<OpticMode>() {
            Ok(m) => self.set_optic_mode(m),
            Err(err) => {
                tracing::warn!(%err, current = %self.mode(), "ignoring mode change");
                false
            }
        }
    }

    /// Set the mode. Returns whether it changed.
    pub fn set_optic_mode(&self, mode: OpticMode) -> bool {
        self.update(mode, |c| &mut c.mode, ConfigChange::Mode)
    }

    /// Set the phase step. Returns whether it changed.
    pub fn set_speed_inc(&self, speed_inc: i32) -> bool {
        self.update(speed_inc, |c| &mut c.speed_inc, ConfigChange::SpeedInc)
    }

    /// Set the threshold. Any value is accepted; it is clamped when frames are processed.
    /// Returns whether it changed.
    pub fn set_threshold(&self, threshold: i32) -> bool {
        self.update(threshold, |c| &mut c.threshold, ConfigChange::Threshold)
    }

    /// Restore the default mode.
    pub fn reset_mode(&self) -> bool {
        self.set_optic_mode(EffectConfig::default().mode)
    }

    /// Restore the default phase step.
    pub fn reset_speed_inc(&self) -> bool {
        self.set_speed_inc(EffectConfig::default().speed_inc)
    }

    /// Restore the default threshold.
    pub fn reset_threshold(&self) -> bool {
        self.set_threshold(EffectConfig::default().threshold)
    }

    /// Register a callback for property changes. It runs on the thread that made the change.
    pub fn subscribe(
        &self,
        callback: impl Fn(&ConfigChange) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Apply a host property bag such as `{"mode": "spiral2", "threshold": 40}`.
    ///
    /// Every present key is type-checked before any setter runs; unknown keys are ignored.
    pub fn apply_params(&self, params: &serde_json::Value) -> HypnoticResult<()> {
        let Some(obj) = params.as_object() else {
            return Err(HypnoticError::validation(
                "effect params must be a JSON object",
            ));
        };
        let mode = match obj.get("mode") {
            Some(v) => Some(
                v.as_str().ok_or_else(|| {
                    HypnoticError::validation("effect param 'mode' must be a string")
                })?,
            ),
            None => None,
        };
        let speed_inc = get_i32(obj, "speedInc")?;
        let threshold = get_i32(obj, "threshold")?;

        if let Some(mode) = mode {
            self.set_mode(mode);
        }
        if let Some(v) = speed_inc {
            self.set_speed_inc(v);
        }
        if let Some(v) = threshold {
            self.set_threshold(v);
        }
        Ok(())
    }

    /// Phase that was applied to the most recent frame.
    pub fn phase(&self) -> Phase {
        self.lock_state().phase
    }

    /// Stream counters.
    pub fn stats(&self) -> EffectStats {
        self.lock_state().stats
    }

    /// Transform one frame.
    ///
    /// Empty frames are returned unchanged and do not advance the animation. The only failure is
    /// an allocation failure for the table or the output frame; the instance stays usable for
    /// the next frame.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(width = frame.width(), height = frame.height(), format = ?frame.format())
    )]
    pub fn process(&self, frame: &VideoFrame) -> HypnoticResult<VideoFrame> {
        let mut guard = self.lock_state();
        let state = &mut *guard;

        if frame.is_empty() {
            state.stats.frames_passed_through += 1;
            tracing::trace!("empty frame, passing through");
            return Ok(frame.clone());
        }

        let cfg = self.config();
        let (width, height) = (frame.width(), frame.height());

        if !state
            .table
            .as_ref()
            .is_some_and(|t| t.matches(width, height, cfg.mode))
        {
            state.table = None;
            let table = PatternTable::build(width, height, cfg.mode)?;
            state.stats.table_rebuilds += 1;
            tracing::debug!(
                width,
                height,
                mode = %cfg.mode,
                rebuilds = state.stats.table_rebuilds,
                "rebuilt pattern table"
            );
            state.table = Some(table);
        }
        let Some(table) = state.table.as_ref() else {
            return Err(HypnoticError::Other(anyhow::anyhow!(
                "internal error: pattern table missing after rebuild"
            )));
        };

        let mut out = VideoFrame::new(width, height, frame.format(), frame.timestamp())?;

        state.phase = state.phase.advance(cfg.speed_inc);
        let pass = RowPass {
            combine: self.opts.combine,
            format: frame.format(),
            phase: state.phase,
            threshold: clamp_threshold(cfg.threshold),
        };
        self.render_rows(table, frame, &mut out, pass);

        state.stats.frames_processed += 1;
        Ok(out)
    }

    fn render_rows(
        &self,
        table: &PatternTable,
        src: &VideoFrame,
        out: &mut VideoFrame,
        pass: RowPass,
    ) {
        let row_len = out.stride();
        let run = |(y, dst): (usize, &mut [u8])| {
            let y = y as u32;
            pass.run(table.row(y), src.row(y), dst);
        };
        match &self.pool {
            Some(pool) => pool.install(|| {
                out.data_mut()
                    .par_chunks_exact_mut(row_len)
                    .enumerate()
                    .for_each(run)
            }),
            None => out
                .data_mut()
                .chunks_exact_mut(row_len)
                .enumerate()
                .for_each(run),
        }
    }

    fn update<T: Copy + PartialEq>(
        &self,
        value: T,
        field: impl FnOnce(&mut EffectConfig) -> &mut T,
        change: impl FnOnce(T) -> ConfigChange,
    ) -> bool {
        let changed = {
            let mut cfg = self.config.write().unwrap_or_else(PoisonError::into_inner);
            let slot = field(&mut *cfg);
            if *slot == value {
                false
            } else {
                *slot = value;
                true
            }
        };
        if changed {
            self.observers.notify(change(value));
        }
        changed
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, StreamState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HypnoticElement {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HypnoticElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HypnoticElement")
            .field("opts", &self.opts)
            .field("config", &self.config())
            .field("stats", &self.stats())
            .field("observers", &self.observers)
            .finish()
    }
}

fn get_i32(
    obj: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> HypnoticResult<Option<i32>> {
    let Some(v) = obj.get(key) else {
        return Ok(None);
    };
    let Some(n) = v.as_i64() else {
        return Err(HypnoticError::validation(format!(
            "effect param '{key}' must be an integer"
        )));
    };
    i32::try_from(n)
        .map(Some)
        .map_err(|_| HypnoticError::validation(format!("effect param '{key}' is out of range")))
}

fn build_thread_pool(threads: Option<usize>) -> HypnoticResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(HypnoticError::validation(
            "row threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| {
            HypnoticError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/hypnotic.rs"]
mod tests;
