//! dbcv binary.
//!
//! Computes the Density-Based Clustering Validation index of a labelled csv file.
//! Command syntax is dbcv --csv csvfile [--delim u8] [--dist name] [--floor eps] [--kruskal] [--seq].
//!
//! The csv file must have one record by point: coordinates followed by an integer cluster label,
//! a negative label flags a noise point. Lines beginning with '#' or '%' at the top of the file are skipped.
//!
//! --dist    : name of distance to use: SqEuclidean (default), Euclidean, DistL1, DistL2, DistCosine
//! --floor   : floor null distances in core distances at given value instead of stopping with an error
//! --kruskal : use Kruskal algorithm instead of Prim for spanning trees
//! --seq     : do not use multithreading
//!
//! Set RUST_LOG=dbcv=debug to follow the stages of the evaluation.

use std::time::{Duration, SystemTime};

use anyhow::anyhow;
use clap::{Arg, ArgAction, ArgMatches, Command};
use cpu_time::ProcessTime;

use hnsw_rs::prelude::{DistCosine, DistL1, DistL2};

use dbcv::prelude::*;
use dbcv::tools::io::get_labelled_points_from_csv;

fn parse_params(matches: &ArgMatches) -> anyhow::Result<DbcvParams> {
    log::debug!("in parse_params");
    let mut params = DbcvParams::default();
    if let Some(floor) = matches.get_one::<String>("floor") {
        match floor.parse::<f64>() {
            Ok(eps) => params.set_zero_distance_floor(eps),
            _ => {
                return Err(anyhow!("could not parse floor parameter"));
            }
        }
    }
    if matches.get_flag("kruskal") {
        params.set_mst_algo(MstAlgo::Kruskal);
    }
    if matches.get_flag("seq") {
        params.set_parallel(false);
    }
    Ok(params)
} // end of parse_params

fn run<D>(distance: D, params: DbcvParams, relation: &VectorRelation<f32>, clustering: &Clustering) -> anyhow::Result<DbcvResult<f64>>
where
    D: DistanceFunction<f32, f64>,
{
    let evaluator = DbcvEvaluator::with_params(distance, params);
    let res = evaluator.evaluate(relation, clustering)?;
    Ok(res)
}

fn main() {
    let _ = env_logger::builder().try_init();
    //
    let matches = Command::new("dbcv")
        .arg_required_else_help(true)
        .arg(
            Arg::new("csvfile")
                .long("csv")
                .required(true)
                .help("expecting a csv file"),
        )
        .arg(
            Arg::new("delim")
                .long("delim")
                .short('d')
                .help("delimiter can be ' ', ','"),
        )
        .arg(
            Arg::new("dist")
                .long("dist")
                .help("distance : \"SqEuclidean\", \"Euclidean\", \"DistL1\", \"DistL2\", \"DistCosine\""),
        )
        .arg(
            Arg::new("floor")
                .long("floor")
                .help("floor for null distances in core distance estimation"),
        )
        .arg(
            Arg::new("kruskal")
                .long("kruskal")
                .action(ArgAction::SetTrue)
                .help("use Kruskal spanning trees"),
        )
        .arg(
            Arg::new("seq")
                .long("seq")
                .action(ArgAction::SetTrue)
                .help("sequential run"),
        )
        .get_matches();
    //
    let params = match parse_params(&matches) {
        Ok(params) => params,
        Err(e) => {
            log::error!("parsing parameters failed");
            println!("exiting with error {}", e);
            std::process::exit(1);
        }
    };
    params.log();
    //
    let fname = match matches.get_one::<String>("csvfile") {
        Some(f) if !f.is_empty() => f.clone(),
        _ => {
            println!("parsing of csv file name failed");
            std::process::exit(1);
        }
    };
    log::info!("input file : {:?}", fname);
    let delim = match matches.get_one::<String>("delim") {
        Some(c) if c.len() == 1 => c.as_bytes()[0],
        Some(c) => {
            println!("delimiter must be one character, got {:?}", c);
            std::process::exit(1);
        }
        None => b',',
    };
    let distname = matches
        .get_one::<String>("dist")
        .cloned()
        .unwrap_or_else(|| String::from("SqEuclidean"));
    //
    let filepath = std::path::Path::new(&fname);
    let (points, labels) = match get_labelled_points_from_csv::<f32>(filepath, delim) {
        Ok(res) => res,
        Err(e) => {
            log::error!("could not load file : {:?}", filepath);
            println!("exiting with error {}", e);
            std::process::exit(1);
        }
    };
    log::info!("csv file {} read, nb points : {}", fname, points.len());
    let relation = VectorRelation::new(points);
    let clustering = Clustering::from_labels(&labels);
    //
    let cpu_start = ProcessTime::now();
    let sys_now = SystemTime::now();
    let res = match distname.as_str() {
        "SqEuclidean" => run(SqEuclidean, params, &relation, &clustering),
        "Euclidean" => run(Euclidean, params, &relation, &clustering),
        "DistL1" => run(AnnDistance(DistL1 {}), params, &relation, &clustering),
        "DistL2" => run(AnnDistance(DistL2 {}), params, &relation, &clustering),
        "DistCosine" => run(AnnDistance(DistCosine {}), params, &relation, &clustering),
        _ => Err(anyhow!("unknown distance {}", distname)),
    };
    let cpu_time: Duration = cpu_start.elapsed();
    log::info!(" evaluation sys time(s) {:?} cpu time {:?}", sys_now.elapsed().map(|d| d.as_secs()).unwrap_or(0), cpu_time.as_secs());
    //
    match res {
        Ok(res) => {
            for c in res.get_clusters() {
                let name = clustering.get_clusters()[c.index].get_name().unwrap_or("");
                match (c.dsc, c.dspc) {
                    (Some(dsc), dspc) => println!(
                        "cluster {:>6} size {:>6} : dsc {:.5e} dspc {:?} validity {:.5} weight {:.5}",
                        name, c.size, dsc, dspc, c.validity, c.weight
                    ),
                    (None, _) => println!("cluster {:>6} size {:>6} : skipped (noise: {})", name, c.size, c.noise),
                }
            }
            print!("{}", res.to_report());
        }
        Err(e) => {
            log::error!("evaluation failed");
            println!("exiting with error {}", e);
            std::process::exit(1);
        }
    }
} // end of main
