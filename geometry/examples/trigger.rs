//! A pressure plate on the floor and a target on a wall, hit by a look ray.
//!
//! Run with `RUST_LOG=debug` to see the geometry diagnostics. An optional first argument names a
//! TOML settings file.

use std::{cell::Cell, env, rc::Rc};

use anyhow::Result;
use axial_geometry::{Line, Plane, Point, Settings, Vector};
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let settings = match env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    info!("Settings: {settings:?}");

    let hits = Rc::new(Cell::new(0));

    let mut wall = Plane::new(Point::new(0.0, 0.0, 10.0), Vector::E_X, Vector::E_Y)
        .with_settings(settings);
    let counter = hits.clone();
    wall.add_field(
        move || {
            counter.set(counter.get() + 1);
            info!("Target hit");
        },
        [Point::new(0.0, 1.5, 10.0), Point::new(0.5, 1.5, 10.0)],
    )?;

    let floor =
        Plane::new(Point::ORIGIN, Vector::E_X, Vector::E_Z).with_settings(*wall.settings());
    if let Some(edge) = wall.intersect_plane(&floor) {
        info!("Wall meets floor along {edge}");
    }

    let eye = Point::eye_location(0.1, 0.0, 0.0, 1.62);
    for (pitch, yaw) in [(0.0, 0.0), (-1.0, 0.5), (20.0, 0.0)] {
        let look = Line::new(eye, Vector::from_pitch_yaw(pitch, yaw));
        match wall.intersect_line(&look) {
            Some(point) => {
                // Exact containment needs the point snapped back onto the wall.
                let point = point.with_z(10.0);
                info!("Looking at {point} (pitch {pitch}, yaw {yaw})");
                wall.hit(point);
            }
            None => info!("Not looking at the wall (pitch {pitch}, yaw {yaw})"),
        }
    }

    let turned = wall
        .rotated_along(&Line::new(Point::new(0.0, 0.0, 10.0), Vector::E_Y), 90.0)
        .map(|plane| plane.to_string());
    info!("Wall turned around its vertical edge: {turned:?}");

    println!("{} target hits", hits.get());
    Ok(())
}
