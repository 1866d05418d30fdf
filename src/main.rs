use std::{env, fs};

use anyhow::Context;
use log::info;

use chainnet::{config::RunSpec, training::TrainerBuilder};

const DEFAULT_RUN: &str = include_str!("../demos/xor.json");

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let raw = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => {
            info!("no run given, using the bundled xor demo");
            DEFAULT_RUN.to_string()
        }
    };

    let spec: RunSpec = serde_json::from_str(&raw).context("parsing the run spec")?;
    let run = TrainerBuilder::new().build(spec).context("building the run")?;
    let mut model = run.model;

    info!(
        params = model.size(), samples = run.dataset.len();
        "starting training"
    );

    let train_loss = run
        .trainer
        .train(&mut model, &run.dataset)
        .context("training")?;

    let test_dataset = run.test_dataset.as_ref().unwrap_or(&run.dataset);
    let test_loss = run
        .trainer
        .test(&mut model, test_dataset)
        .context("testing")?;

    info!(train_loss = train_loss, test_loss = test_loss; "wrapping up");
    println!("train loss: {train_loss}\ntest loss: {test_loss}");

    Ok(())
}
