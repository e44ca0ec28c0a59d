use crate::config::AppConfig;
use crate::data::cases::CaseTable;
use crate::data::regions::load_regions;
use crate::encode::ffmpeg::FfmpegSink;
use crate::encode::sink::FrameSink;
use crate::foundation::error::ChoroResult;
use crate::render::frame::FrameRenderer;
use crate::render::text::FontBytes;
use crate::session::driver::{AnimationDriver, ChoroplethProducer, RenderStats};

/// Load the table, boundaries, scale and font named by `cfg` into a ready renderer.
///
/// Any input failure surfaces here, before a single frame is drawn.
#[tracing::instrument(skip_all)]
pub fn load_renderer(cfg: &AppConfig) -> ChoroResult<FrameRenderer> {
    cfg.validate()?;
    let table = CaseTable::from_path(&cfg.input.cases, &cfg.input.code_column)?;
    let regions = load_regions(&cfg.input.boundaries, &cfg.input.id_field)?;
    let scale = cfg.scale.build()?;
    let font = FontBytes::resolve(cfg.font.as_deref())?;

    let unmatched = regions.iter().filter(|r| !table.contains(&r.code)).count();
    if unmatched > 0 {
        tracing::info!(
            unmatched,
            "regions without a case row will stay unfilled"
        );
    }

    FrameRenderer::new(table, &regions, scale, cfg.render_opts(), font)
}

/// Render every date of the table into `sink`.
pub fn render_to_sink(
    renderer: FrameRenderer,
    cfg: &AppConfig,
    sink: &mut dyn FrameSink,
) -> ChoroResult<RenderStats> {
    let dates = renderer.dates().to_vec();
    let mut producer = ChoroplethProducer::new(renderer)?;
    AnimationDriver::new(cfg.fps()?).run(&dates, &mut producer, sink)
}

/// Full run: load inputs, render every date, encode `cfg.output.path`.
pub fn render_to_mp4(cfg: &AppConfig) -> ChoroResult<RenderStats> {
    let renderer = load_renderer(cfg)?;
    let mut sink = FfmpegSink::new(cfg.ffmpeg_opts());
    render_to_sink(renderer, cfg, &mut sink)
}
