use std::time::{Duration, Instant};

use anyhow::Context as _;
use hypnotic::{
    Combine, EffectConfig, HypnoticElement, HypnoticOpts, OpticMode, PixelFormat, RowThreading,
    TimeBase, Timestamp, VideoFrame,
};
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    frames: u32,
    warmup: u32,
    speed_inc: i32,
    threshold: i32,
    combine: Combine,
    format: PixelFormat,
    modes: Vec<OpticMode>,
    parallel: bool,
    threads: Option<usize>,
    json: bool,
}

#[derive(Clone, Debug)]
struct ModeReport {
    mode: OpticMode,
    per_frame: Vec<Duration>,
    table_rebuilds: u64,
    last_frame_sha256: String,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();
    let args = parse_args()?;

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if args.frames == 0 {
        anyhow::bail!("--frames must be > 0");
    }
    if let Some(n) = args.threads
        && n == 0
    {
        anyhow::bail!("--threads must be >= 1 when set");
    }

    eprintln!(
        "bench: {frames} frame(s) per mode ({profile} build), {w}x{h} {format:?}, combine={combine:?}, rows={rows}, threads={threads}",
        frames = args.frames,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        w = args.width,
        h = args.height,
        format = args.format,
        combine = args.combine,
        rows = if args.parallel {
            "parallel"
        } else {
            "sequential"
        },
        threads = args
            .threads
            .map(|n| n.to_string())
            .unwrap_or_else(|| "auto".to_string()),
    );

    let mut reports = Vec::with_capacity(args.modes.len());
    for &mode in &args.modes {
        reports.push(run_mode(&args, mode).with_context(|| format!("bench mode '{mode}'"))?);
    }

    if args.json {
        print_json(&args, &reports)?;
    } else {
        report_percentiles(&reports);
    }
    Ok(())
}

fn run_mode(args: &BenchArgs, mode: OpticMode) -> anyhow::Result<ModeReport> {
    let fx = HypnoticElement::with_opts(HypnoticOpts {
        combine: args.combine,
        threading: RowThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
    })?
    .with_config(EffectConfig {
        mode,
        speed_inc: args.speed_inc,
        threshold: args.threshold,
    });

    let time_base = TimeBase::new(1, 30)?;
    for i in 0..args.warmup {
        let frame = source_frame(args, Timestamp::new(i64::from(i), time_base))?;
        fx.process(&frame)?;
    }

    let mut per_frame = Vec::with_capacity(args.frames as usize);
    let mut last = None;
    for i in 0..args.frames {
        let frame = source_frame(args, Timestamp::new(i64::from(i), time_base))?;
        let t0 = Instant::now();
        let out = fx.process(&frame)?;
        per_frame.push(t0.elapsed());
        last = Some(out);
    }
    let last = last.ok_or_else(|| anyhow::anyhow!("no frames were processed"))?;

    Ok(ModeReport {
        mode,
        per_frame,
        table_rebuilds: fx.stats().table_rebuilds,
        last_frame_sha256: sha256_hex(last.data()),
    })
}

/// Deterministic diagonal gradient so every run sees the same pixels.
fn source_frame(args: &BenchArgs, ts: Timestamp) -> anyhow::Result<VideoFrame> {
    let bpp = args.format.bytes_per_pixel();
    let stride = args.format.packed_stride(args.width)?;
    let mut data = vec![0u8; stride * args.height as usize];
    for (y, row) in data.chunks_exact_mut(stride).enumerate() {
        for (x, px) in row.chunks_exact_mut(bpp).enumerate() {
            px.fill(((x + y) % 256) as u8);
        }
    }
    Ok(VideoFrame::from_raw(
        args.width,
        args.height,
        args.format,
        stride,
        data,
        ts,
    )?)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let n = sorted.len();
    let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
    sorted[rank - 1]
}

fn sorted(v: &[Duration]) -> Vec<Duration> {
    let mut v = v.to_vec();
    v.sort_by_key(|d| d.as_nanos());
    v
}

fn fmt_ms(d: Duration) -> String {
    format!("{:.3}ms", d.as_secs_f64() * 1000.0)
}

fn report_percentiles(reports: &[ModeReport]) {
    eprintln!("\nper-frame latency (p50/p90/p99):");
    for r in reports {
        let v = sorted(&r.per_frame);
        eprintln!(
            "  {name:18} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}  rebuilds={rebuilds}  sha256={sha}",
            name = r.mode.as_str(),
            p50 = fmt_ms(percentile(&v, 0.50)),
            p90 = fmt_ms(percentile(&v, 0.90)),
            p99 = fmt_ms(percentile(&v, 0.99)),
            rebuilds = r.table_rebuilds,
            sha = &r.last_frame_sha256[..16],
        );
    }
}

fn print_json(args: &BenchArgs, reports: &[ModeReport]) -> anyhow::Result<()> {
    let modes: Vec<serde_json::Value> = reports
        .iter()
        .map(|r| {
            let v = sorted(&r.per_frame);
            json!({
                "mode": r.mode.as_str(),
                "frames": r.per_frame.len(),
                "p50_ms": percentile(&v, 0.50).as_secs_f64() * 1000.0,
                "p90_ms": percentile(&v, 0.90).as_secs_f64() * 1000.0,
                "p99_ms": percentile(&v, 0.99).as_secs_f64() * 1000.0,
                "table_rebuilds": r.table_rebuilds,
                "last_frame_sha256": r.last_frame_sha256,
            })
        })
        .collect();
    let doc = json!({
        "width": args.width,
        "height": args.height,
        "format": format!("{:?}", args.format),
        "combine": format!("{:?}", args.combine),
        "parallel": args.parallel,
        "modes": modes,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 1280,
        height: 720,
        frames: 120,
        warmup: 2,
        speed_inc: 16,
        threshold: 128,
        combine: Combine::Replace,
        format: PixelFormat::Rgba8,
        modes: OpticMode::ALL.to_vec(),
        parallel: false,
        threads: None,
        json: false,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_num(args.next(), "--width")?,
            "--height" => out.height = parse_num(args.next(), "--height")?,
            "--frames" => out.frames = parse_num(args.next(), "--frames")?,
            "--warmup" => out.warmup = parse_num(args.next(), "--warmup")?,
            "--speed-inc" => out.speed_inc = parse_num(args.next(), "--speed-inc")?,
            "--threshold" => out.threshold = parse_num(args.next(), "--threshold")?,
            "--mode" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --mode"))?;
                out.modes = vec![v.parse::<OpticMode>()?];
            }
            "--combine" => {
                let v = args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --combine (replace|invert|luma-xor)")
                })?;
                out.combine = match v.as_str() {
                    "replace" => Combine::Replace,
                    "invert" => Combine::Invert,
                    "luma-xor" => Combine::LumaXor,
                    _ => anyhow::bail!(
                        "unknown --combine '{v}' (expected replace|invert|luma-xor)"
                    ),
                };
            }
            "--format" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --format"))?;
                out.format = match v.as_str() {
                    "rgba" => PixelFormat::Rgba8,
                    "bgra" => PixelFormat::Bgra8,
                    "rgb" => PixelFormat::Rgb8,
                    "bgr" => PixelFormat::Bgr8,
                    "gray" => PixelFormat::Gray8,
                    _ => anyhow::bail!("unknown --format '{v}' (expected rgba|bgra|rgb|bgr|gray)"),
                };
            }
            "--parallel" => out.parallel = true,
            "--threads" => out.threads = Some(parse_num(args.next(), "--threads")?),
            "--json" => out.json = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"hypnotic-bench (debug)

Feeds a synthetic gradient stream through the effect and reports per-frame latency per mode.

Usage:
  cargo run -q --release
  cargo run -q --release -- --mode spiral2 --frames 600
  cargo run -q --release -- --parallel --threads 4 --json

Args:
  --width N        (default 1280)
  --height N       (default 720)
  --frames N       (default 120; measured frames per mode)
  --warmup N       (default 2)
  --speed-inc N    (default 16)
  --threshold N    (default 128)
  --mode NAME      spiral1|spiral2|parabola|horizontalStripe (default: all)
  --combine NAME   replace|invert|luma-xor (default replace)
  --format NAME    rgba|bgra|rgb|bgr|gray (default rgba)
  --parallel       combine rows on a rayon pool
  --threads N      pool size for --parallel (default auto)
  --json           print a JSON report on stdout
"#
    );
}

fn parse_num<T>(v: Option<String>, flag: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<T>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}
