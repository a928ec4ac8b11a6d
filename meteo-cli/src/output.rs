use meteo_core::{
    AppState, Location, Outcome, Quantity,
    present::{ForecastView, candidate_labels, render},
};

pub fn print_forecast(view: &ForecastView) {
    let c = &view.current;
    println!("{}", c.place);
    println!("As of {}", c.as_of);
    println!();
    println!("  {} {}  {}", c.icon, c.temperature, c.summary);
    println!("  Feels like     {}", c.feels_like);
    println!("  Humidity       {}", c.humidity);
    println!("  Wind           {}", c.wind);
    println!("  Precipitation  {}", c.precipitation);

    if !view.days.is_empty() {
        println!();
        for day in &view.days {
            println!(
                "  {:<4} {} {:>5} {:>5}  {}",
                day.day, day.icon, day.high, day.low, day.label
            );
        }
    }
}

pub fn print_candidates(candidates: &[Location]) {
    for (i, label) in candidate_labels(candidates).iter().enumerate() {
        println!("  {}. {label}", i + 1);
    }
}

/// Print whatever `outcome` left in `state`.
pub fn print_outcome(state: &AppState, outcome: &Outcome) {
    match outcome {
        Outcome::Forecast => {
            if let Some(forecast) = &state.forecast {
                let units = forecast.units;
                print_forecast(&render(forecast));
                println!();
                println!(
                    "Units: {} ({}, {}, {})",
                    units,
                    units.suffix(Quantity::Temperature),
                    units.suffix(Quantity::WindSpeed),
                    units.suffix(Quantity::Precipitation),
                );
            }
        }
        Outcome::Candidates => {
            println!("Several places match:");
            print_candidates(&state.candidates);
        }
        Outcome::Failed(msg) => eprintln!("{msg}"),
        Outcome::Idle | Outcome::Stale => {}
    }
}
