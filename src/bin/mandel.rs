extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches};
use failure::Error;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use num::Complex;
use std::cmp;
use std::fs::File;
use std::str::FromStr;

use mandelbrot::EscapeTimeRenderer;

/// Given a string and a separator, returns the two values
/// separated by the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const RESOLUTION: &str = "resolution";
const UPPERLEFT: &str = "upperleft";
const LOWERRIGHT: &str = "lowerright";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot set renderer")
        // The corner arguments legitimately begin with a hyphen.
        .setting(AppSettings::AllowLeadingHyphen)
        .arg(
            Arg::with_name(OUTPUT)
                .index(1)
                .default_value("mandelbrot.pgm")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(RESOLUTION)
                .index(2)
                .default_value("1000x750")
                .validator(|s| {
                    validate_pair::<usize>(
                        &s,
                        'x',
                        "could not parse image resolution, expected WIDTHxHEIGHT",
                    )
                })
                .help("Resolution of the output image"),
        )
        .arg(
            Arg::with_name(UPPERLEFT)
                .index(3)
                .default_value("-2.0,1.0")
                .allow_hyphen_values(true)
                .validator(|s| {
                    validate_pair::<f64>(&s, ',', "could not parse upper left corner, expected RE,IM")
                })
                .help("Upper left corner of the viewport"),
        )
        .arg(
            Arg::with_name(LOWERRIGHT)
                .index(4)
                .default_value("1.0,-1.0")
                .allow_hyphen_values(true)
                .validator(|s| {
                    validate_pair::<f64>(&s, ',', "could not parse lower right corner, expected RE,IM")
                })
                .help("Lower right corner of the viewport"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), Error> {
    let output = File::create(outfile)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::Gray(8))?;
    Ok(())
}

fn run() -> Result<(), Error> {
    let matches = args();
    let bounds = parse_pair::<usize>(matches.value_of(RESOLUTION).unwrap(), 'x')
        .expect("Error parsing image dimensions");
    let upper_left = parse_complex(matches.value_of(UPPERLEFT).unwrap())
        .expect("Error parsing upper left corner");
    let lower_right = parse_complex(matches.value_of(LOWERRIGHT).unwrap())
        .expect("Error parsing lower right corner");

    let renderer = EscapeTimeRenderer::new(bounds.0, bounds.1, upper_left, lower_right)?;
    let threads = cmp::max(num_cpus::get(), 1);
    let pixels = renderer.render(threads)?;
    write_image(matches.value_of(OUTPUT).unwrap(), &pixels, bounds)?;
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
