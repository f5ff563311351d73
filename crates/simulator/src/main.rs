//! Drive the streaming cache with a scripted drag and an in-process fake server, logging what would go over the
//! network.
//!
//! `RUST_LOG=debug cargo run -p isostream_simulator -- --steps 300` shows every area transition.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::*;
use structopt::StructOpt;

use isostream_grid::{CellRect, Grid, GridBuilder, Viewport, ViewportMove, V2};
use isostream_streaming::*;

#[derive(Debug, StructOpt)]
#[structopt(name = "isostream-simulator")]
struct Args {
    /// Map width and height in cells.
    #[structopt(long, default_value = "1000")]
    map_cells: i32,

    #[structopt(long, default_value = "256")]
    tile_width: f64,

    #[structopt(long, default_value = "128")]
    tile_height: f64,

    #[structopt(long, default_value = "1280")]
    viewport_width: f64,

    #[structopt(long, default_value = "720")]
    viewport_height: f64,

    /// Number of pointer samples to simulate.
    #[structopt(long, default_value = "600")]
    steps: u32,

    /// Pointer movement per sample, in screen pixels.
    #[structopt(long, default_value = "-24", allow_hyphen_values = true)]
    drag_x: f64,

    #[structopt(long, default_value = "12", allow_hyphen_values = true)]
    drag_y: f64,

    /// Milliseconds between samples.
    #[structopt(long, default_value = "16")]
    frame_ms: u64,

    /// After the drag, jump straight to this cell, given as `x,y`.
    #[structopt(long)]
    jump_to: Option<String>,

    /// JSON file of streaming tunables.
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
}

fn parse_cell(input: &str) -> Result<V2<i32>> {
    let (x, y) = input
        .split_once(',')
        .with_context(|| format!("Expected x,y but got {}", input))?;
    Ok(V2::new(x.trim().parse()?, y.trim().parse()?))
}

fn load_config(path: Option<&PathBuf>) -> Result<StreamingConfig> {
    let path = match path {
        Some(p) => p,
        None => return Ok(Default::default()),
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    Ok(StreamingConfig::from_json_str(&text)?)
}

#[derive(Debug, Default)]
struct Totals {
    transitions: u32,
    jumps: u32,
    requests: u32,
    responses: u32,
}

/// Cells between resource points along each axis in the fake server's world.
const RESOURCE_SPACING: i32 = 4;

/// Stand-in for the server: a stone resource point on a regular lattice, for the part of the area inside the map.
fn respond(grid: &Grid, request: &FetchRequest) -> Result<AreaContentUpdate> {
    let map = CellRect::square(V2::new(0, 0), grid.get_map_cells())?;
    let added = request
        .bounds
        .intersection(&map)
        .into_iter()
        .flat_map(|r| r.iter_cells())
        .filter(|c| c.x % RESOURCE_SPACING == 0 && c.y % RESOURCE_SPACING == 0)
        .map(|c| {
            AreaContent::ResourcePoint(ResourcePoint {
                id: ContentId(grid.cell_id(c.x, c.y).0 as u64),
                x: c.x,
                y: c.y,
                resource: ResourceKind::Stone,
                remaining: 1000,
            })
        })
        .collect();

    Ok(AreaContentUpdate {
        area: request.area,
        added,
        removed: vec![],
        updated: vec![],
    })
}

fn step(
    cache: &mut AreaStreamingCache,
    clock: &ManualTimeSource,
    movement: ViewportMove,
    totals: &mut Totals,
) -> Result<()> {
    let cell = match movement.cell {
        Some(c) if cache.grid().is_valid_cell(c.x, c.y) => c,
        _ => {
            trace!("Viewport center {} is off the map", movement.pixel);
            return Ok(());
        }
    };

    if let CenterUpdate::AreaChanged(change) = cache.set_center(cell, movement.pixel) {
        totals.transitions += 1;
        if change.jump {
            totals.jumps += 1;
        }
    }

    for request in cache.drain_fetch_requests(clock.now_millis()) {
        debug!(
            "Requesting {} cells {} to {}",
            request.area,
            request.get_start_cell(),
            request.get_end_cell()
        );
        totals.requests += 1;
        let grid = cache.grid().clone();
        cache.ingest(respond(&grid, &request)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    isostream_logging::log_to_stderr();
    let args = Args::from_args();

    let grid = Arc::new(
        GridBuilder::new()
            .tile_size(args.tile_width, args.tile_height)
            .map_cells(args.map_cells, args.map_cells)
            .viewport_size(args.viewport_width, args.viewport_height)
            .build()?,
    );
    let config = load_config(args.config.as_ref())?;
    let jump_to = args.jump_to.as_deref().map(parse_cell).transpose()?;

    let mut cache = AreaStreamingCache::with_config(grid.clone(), config)?;
    let (observer, events) = ChannelObserver::unbounded();
    cache.add_observer(Box::new(observer));

    let clock = ManualTimeSource::new(SystemTimeSource.now_millis());
    let mid = args.map_cells / 2;
    let mut viewport = Viewport::centered_on_cell(grid, V2::new(mid, mid));
    let mut totals = Totals::default();

    step(&mut cache, &clock, viewport.current(), &mut totals)?;
    for _ in 0..args.steps {
        clock.advance(args.frame_ms);
        let movement = viewport.drag(V2::new(args.drag_x, args.drag_y));
        step(&mut cache, &clock, movement, &mut totals)?;
    }

    if let Some(cell) = jump_to {
        clock.advance(args.frame_ms);
        let movement = viewport.jump_to_cell(cell);
        step(&mut cache, &clock, movement, &mut totals)?;
    }

    for event in events.try_iter() {
        if let StreamingEvent::AreaContentUpdated(_) = event {
            totals.responses += 1;
        }
    }

    info!(
        "Finished at {:?} in {:?}: {} area transitions ({} jumps), {} requests, {} responses, {} areas known",
        cache.center_cell(),
        cache.center_area(),
        totals.transitions,
        totals.jumps,
        totals.requests,
        totals.responses,
        cache.descriptor_count()
    );

    Ok(())
}
