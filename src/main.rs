// Trains a network described by a JSON session file:
//
//   {
//     "network": { "input_layer_size": 2, "hidden_layers": [3], "output_layer_size": 1 },
//     "data": [ { "input": [0, 1], "output": [0] }, ... ]
//   }
//
// Run with:
//   cargo run -- session.json
use std::{env, fs::File, io::BufReader, process};

use log::{error, info};
use serde::Deserialize;

use nervous::{Network, NetworkConfig, Sample, TrainingOverrides};

#[derive(Deserialize)]
struct Session {
    network: NetworkConfig,
    data: Vec<Sample>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: nervous <session.json>");
        process::exit(2);
    };

    if let Err(e) = run(&path) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(path: &str) -> nervous::Result<()> {
    let reader = BufReader::new(File::open(path)?);
    let Session { network, mut data } = serde_json::from_reader(reader)?;

    let mut network = Network::new(network)?;
    info!(
        "training on {} samples, {} synapses",
        data.len(),
        network.synapse_count()
    );

    let logging = TrainingOverrides {
        log: Some(true),
        ..Default::default()
    };
    let output = network.train(&mut data, Some(&logging))?;
    println!("error: {}", output.error);

    for sample in &data {
        let prediction = network.predict(&sample.input)?;
        println!("{:?} -> {:.4?} (expected {:?})", sample.input, prediction, sample.output);
    }
    Ok(())
}
