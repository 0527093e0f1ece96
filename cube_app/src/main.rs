//! Cube field demo
//!
//! Headless scene driver for the globe engine: a landmark cube over Beijing
//! plus a scattered field of smaller cubes, rendered for a few frames with a
//! pick pass and a render pass each. Geometry goes through the recording
//! trace device; the log shows culling counts, queue sizes, and a pick
//! resolution round trip.

use globe_engine::prelude::*;
use rand::Rng;

// Initial view, matching the landmark cube's neighborhood
const INITIAL_LATITUDE: f64 = 40.0;
const INITIAL_LONGITUDE: f64 = 116.0;
const EYE_ALTITUDE: f64 = 50_000.0;

const LANDMARK_SIZE: f64 = 1000.0;
const FIELD_CUBES: usize = 64;
const FIELD_SIZE_MIN: f64 = 50.0;
const FIELD_SIZE_MAX: f64 = 500.0;
const FIELD_SPREAD_DEG: f64 = 1.5;
const FRAMES: u64 = 3;

const EARTH_RADIUS: f64 = 6_371_000.0;

/// Spherical globe: geographic coordinates to Earth-centered Cartesian.
struct SphericalGlobe {
    radius: f64,
}

impl Globe for SphericalGlobe {
    fn point_from_position(&self, position: &Position) -> Point3 {
        self.point_at_elevation(
            position.latitude(),
            position.longitude(),
            position.altitude(),
        )
    }

    fn point_at_elevation(&self, latitude: f64, longitude: f64, elevation: f64) -> Point3 {
        let lat = latitude.to_radians();
        let lon = longitude.to_radians();
        let r = self.radius + elevation;
        Point3::new(
            r * lat.cos() * lon.cos(),
            r * lat.cos() * lon.sin(),
            r * lat.sin(),
        )
    }

    fn surface_orientation_at(&self, position: &Position) -> Mat4 {
        let lat = position.latitude().to_radians();
        let lon = position.longitude().to_radians();
        let origin = self.point_from_position(position);

        let up = Vec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());
        let east = Vec3::new(-lon.sin(), lon.cos(), 0.0);
        let north = up.cross(&east);

        Mat4::new(
            east.x, north.x, up.x, origin.x,
            east.y, north.y, up.y, origin.y,
            east.z, north.z, up.z, origin.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

/// Camera hovering over the landmark, looking at the surface.
fn build_view(globe: &SphericalGlobe) -> View {
    let eye = globe.point_at_elevation(INITIAL_LATITUDE, INITIAL_LONGITUDE, EYE_ALTITUDE);
    let target = globe.point_at_elevation(INITIAL_LATITUDE, INITIAL_LONGITUDE, 0.0);

    let fov_y = 45_f64.to_radians();
    let modelview = Mat4::look_at_rh(&eye, &target, &Vec3::z());
    let projection = Mat4::new_perspective(16.0 / 9.0, fov_y, 10.0, 1.0e7);
    let frustum = Frustum::from_view_projection(&(projection * modelview));

    View::new(eye, modelview, frustum, 1080, fov_y)
}

fn build_layer() -> Result<RenderableLayer, Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let mut layer = RenderableLayer::new();

    let landmark = Position::from_degrees(INITIAL_LATITUDE, INITIAL_LONGITUDE, 3000.0)?;
    layer.add(GeoSolid::cube(landmark, LANDMARK_SIZE, PickId(0))?);

    for i in 1..=FIELD_CUBES {
        let lat = INITIAL_LATITUDE + rng.gen_range(-FIELD_SPREAD_DEG..FIELD_SPREAD_DEG);
        let lon = INITIAL_LONGITUDE + rng.gen_range(-FIELD_SPREAD_DEG..FIELD_SPREAD_DEG);
        let alt = rng.gen_range(0.0..5000.0);
        let size = rng.gen_range(FIELD_SIZE_MIN..FIELD_SIZE_MAX);
        let position = Position::from_degrees(lat, lon, alt)?;
        layer.add(GeoSolid::cube(position, size, PickId(i as u64))?);
    }

    Ok(layer)
}

fn run_pass(
    frame: u64,
    pass: PassMode,
    layer: &mut RenderableLayer,
    globe: &SphericalGlobe,
    device: &mut TraceDevice,
    picks: &mut PickSupport,
) {
    let mut ctx = DrawContext::new(frame, pass, build_view(globe), globe, device, picks);
    layer.render(&mut ctx);

    let queued = ctx.ordered().len();
    let culled = layer.len() - queued;
    ctx.draw_ordered();
    drop(ctx);

    log::info!(
        "frame {frame} {pass:?}: {queued} queued, {culled} culled, {} quads emitted",
        device.quads_emitted()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let globe = SphericalGlobe {
        radius: EARTH_RADIUS,
    };
    let mut device = TraceDevice::new();
    let mut picks = PickSupport::new();
    let mut layer = build_layer()?;

    for frame in 1..=FRAMES {
        picks.clear();
        device.clear_ops();

        run_pass(frame, PassMode::Picking, &mut layer, &globe, &mut device, &mut picks);
        run_pass(frame, PassMode::Normal, &mut layer, &globe, &mut device, &mut picks);

        // Resolve the first allocated pick color, as a click handler would.
        if let Some(hit) = picks.resolve(1) {
            log::info!(
                "frame {frame}: pick color 0x{:06X} resolves to {:?} at ({:.2}, {:.2})",
                hit.color.rgb(),
                hit.id,
                hit.position.latitude(),
                hit.position.longitude()
            );
        }
    }

    Ok(())
}
