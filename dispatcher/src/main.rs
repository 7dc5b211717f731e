use std::fs::File;
use std::io::Read;
use std::path::Path;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <instance.json> [output_dir]", args[0]);
        std::process::exit(1)
    }

    let path = &args[1];
    let output_dir = args.get(2).map(String::as_str).unwrap_or("output");

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(error) => {
            println!("Error: {}", error);
            std::process::exit(1)
        }
    };

    let mut input_data = String::new();
    file.read_to_string(&mut input_data).unwrap();
    let input_data: serde_json::Value = match serde_json::from_str(&input_data) {
        Ok(value) => value,
        Err(error) => {
            println!("Error: instance is not valid JSON: {}", error);
            std::process::exit(1)
        }
    };
    println!("\n---------- RUN: {} ----------", path);

    let instance_name = Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("instance");

    match dispatcher::run(input_data, Path::new(output_dir), instance_name) {
        Ok(paths) => {
            for report in paths {
                println!("written: {}", report.display());
            }
        }
        Err(error) => {
            println!("Error: {}", error);
            std::process::exit(1)
        }
    }
}
