use anyhow::Result;
use jamaah_core::jamaah::Jamaah;
use jamaah_core::qibla::{GeoPoint, alignment, qibla};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(
    mut jamaah: Jamaah,
    coordinates: Option<(f64, f64)>,
    heading: Option<f64>,
    save: bool,
) -> Result<()> {
    let origin = match coordinates {
        Some((lat, lon)) => GeoPoint::validated(lat, lon)?,
        None => match jamaah.location()? {
            Some(location) => location,
            None => anyhow::bail!(
                "No location given.\n\n\
                Pass one with:\n  \
                jamaah qibla --lat -6.2088 --lon 106.8456\n\n\
                Add --save to remember it."
            ),
        },
    };

    if save {
        jamaah.set_location(origin)?;
        println!(
            "{}",
            format!("Saved location to {}", jamaah.config_path().display()).dimmed()
        );
    }

    let result = qibla(origin);
    println!(
        "{} {}",
        format!("From {:.4}, {:.4}:", origin.latitude, origin.longitude).dimmed(),
        result.render()
    );

    if let Some(heading) = heading {
        let hint = alignment(heading, result.bearing, jamaah.alignment_threshold());
        println!("{}", hint.render());
    }

    Ok(())
}
