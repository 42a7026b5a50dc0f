use anyhow::Result;
use jamaah_core::jamaah::Jamaah;
use owo_colors::OwoColorize;

pub fn run(jamaah: &Jamaah) -> Result<()> {
    println!("{}", "Paths".bold());
    println!("  Config:     {}", jamaah.config_path().display());
    println!("  Schedules:  {}", jamaah.schedules_path().display());
    println!("  Sent:       {}", jamaah.sent_path().display());

    println!();
    println!("{}", "Settings".bold());
    println!("  Time zone:  {}", jamaah.timezone()?);
    println!("  Today:      {}", jamaah.today()?);
    println!("  Week start: {}", jamaah.config().week_start);
    println!("  Hijri:      {:+} day(s)", jamaah.hijri_offset());
    println!("  Alignment:  {}°", jamaah.alignment_threshold());
    match jamaah.location()? {
        Some(p) => println!("  Location:   {}, {}", p.latitude, p.longitude),
        None => println!("  Location:   {}", "(not set)".dimmed()),
    }

    Ok(())
}
