//! HTML pages for the two routes.
//!
//! Plain string building; every interpolated value goes through [`escape`].

use std::fmt::Write;

use chrono::{DateTime, Local};
use weather_core::{Forecast, ForecastPoint, WeatherRecord};

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
.error{color:#b00020}table{border-collapse:collapse;width:100%}\
td,th{padding:.25rem .5rem;border-bottom:1px solid #ddd;text-align:left}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// Index page: search form, plus the lookup result or error when present.
pub fn index_page(weather: Option<&WeatherRecord>, error: Option<&str>) -> String {
    let mut body = String::from(
        "<h1>Weather</h1>\n\
         <form method=\"post\" action=\"/\">\n\
         <input type=\"text\" name=\"city\" placeholder=\"Enter city\" required>\n\
         <button type=\"submit\">Get weather</button>\n\
         </form>\n",
    );

    if let Some(error) = error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape(error));
    }

    if let Some(w) = weather {
        let icon = w
            .icon
            .as_deref()
            .map(|code| {
                format!(
                    "<img src=\"https://openweathermap.org/img/wn/{}@2x.png\" alt=\"{}\">\n",
                    urlencoding::encode(code),
                    escape(&w.description),
                )
            })
            .unwrap_or_default();

        let _ = write!(
            body,
            "<section>\n<h2>{city}</h2>\n{icon}<ul>\n\
             <li>Temperature: {temp:.1} &deg;C</li>\n\
             <li>Conditions: {desc}</li>\n\
             <li>Humidity: {humidity}%</li>\n\
             <li>Wind: {wind:.1} m/s</li>\n\
             <li>Coordinates: <a href=\"https://www.openstreetmap.org/\
             ?mlat={lat}&amp;mlon={lon}#map=10/{lat}/{lon}\">{lat}, {lon}</a></li>\n\
             </ul>\n\
             <p><a href=\"/forecast/{link}\">5-day forecast</a></p>\n</section>\n",
            city = escape(&w.city),
            temp = w.temperature,
            desc = escape(&w.description),
            humidity = w.humidity,
            wind = w.wind,
            lat = w.lat,
            lon = w.lon,
            link = urlencoding::encode(&w.city),
        );
    }

    layout("Weather", &body)
}

/// Forecast page: city summary and one table per day, or the error message.
pub fn forecast_page(result: Result<&Forecast, &str>, now: DateTime<Local>) -> String {
    let forecast = match result {
        Ok(forecast) => forecast,
        Err(error) => {
            let body = format!(
                "<h1>Forecast</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back</a></p>\n",
                escape(error)
            );
            return layout("Forecast", &body);
        }
    };

    let city = &forecast.city;
    let title = format!("{}, {}", city.name, city.country);
    let mut body = String::new();

    let _ = write!(
        body,
        "<h1>{title}</h1>\n\
         <p>Sunrise {sunrise} &middot; Sunset {sunset}</p>\n\
         <p><small>Updated {now}</small></p>\n",
        title = escape(&title),
        sunrise = city.sunrise.format("%H:%M"),
        sunset = city.sunset.format("%H:%M"),
        now = now.format("%Y-%m-%d %H:%M"),
    );

    if forecast.points.is_empty() {
        body.push_str("<p>No forecast entries.</p>\n");
    }

    for (date, points) in group_by_date(&forecast.points) {
        let _ = write!(
            body,
            "<h2>{}</h2>\n<table>\n<tr><th>Time</th><th>Temp</th><th>Feels like</th>\
             <th>Conditions</th><th>Humidity</th><th>Wind</th><th>Pressure</th><th>Visibility</th></tr>\n",
            escape(date)
        );
        for p in points {
            let _ = writeln!(
                body,
                "<tr><td>{time}</td><td>{temp:.1} &deg;C</td><td>{feels:.1} &deg;C</td><td>{desc}</td>\
                 <td>{humidity}%</td><td>{wind:.1} m/s</td><td>{pressure} hPa</td><td>{vis:.1} km</td></tr>",
                time = escape(&p.time_label()),
                temp = p.temperature,
                feels = p.feels_like,
                desc = escape(&p.description),
                humidity = p.humidity,
                wind = p.wind,
                pressure = p.pressure,
                vis = f64::from(p.visibility) / 1000.0,
            );
        }
        body.push_str("</table>\n");
    }

    body.push_str("<p><a href=\"/\">Back</a></p>\n");
    layout(&title, &body)
}

/// Consecutive points sharing a `date_str`.
fn group_by_date(points: &[ForecastPoint]) -> Vec<(&str, &[ForecastPoint])> {
    points
        .chunk_by(|a, b| a.date_str == b.date_str)
        .map(|chunk| (chunk[0].date_str.as_str(), chunk))
        .collect()
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
