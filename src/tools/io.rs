//! To take charge of csv input of labelled points.
//!
//! Each record holds the coordinates of a point followed by an integer cluster label,
//! a negative label meaning noise. Lines beginning with '#' or '%' before the data are headers.
//!

use anyhow::anyhow;

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use num_traits::Float;

use csv::ReaderBuilder;

// skip first lines beginning with '#' or '%', returns their number
fn skip_header_lines<R: BufRead>(reader: &mut R) -> std::io::Result<usize> {
    let mut nb_header_lines = 0;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() || !(buf[0] == b'#' || buf[0] == b'%') {
            break;
        }
        let mut line = Vec::<u8>::new();
        reader.read_until(b'\n', &mut line)?;
        nb_header_lines += 1;
    }
    Ok(nb_header_lines)
} // end of skip_header_lines

/// get points and labels from a reader. See [get_labelled_points_from_csv]
pub fn get_labelled_points<F, R>(reader: R, delim: u8) -> anyhow::Result<(Vec<Vec<F>>, Vec<i64>)>
where
    F: FromStr + Float,
    R: Read,
{
    let mut bufreader = BufReader::new(reader);
    let nb_headers_line = skip_header_lines(&mut bufreader)?;
    log::info!("get_labelled_points, got header nb lines {}", nb_headers_line);
    //
    let mut nb_fields = 0;
    let mut points = Vec::<Vec<F>>::new();
    let mut labels = Vec::<i64>::new();
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .flexible(true)
        .has_headers(false)
        .from_reader(bufreader);
    for (num_record, result) in rdr.records().enumerate() {
        let record = result?;
        if num_record < 2 {
            log::debug!(" record num {:?}, {:?}", num_record, record);
        }
        if num_record == 0 {
            nb_fields = record.len();
            log::info!("nb fields = {}", nb_fields);
            if nb_fields < 2 {
                log::error!("found only one field in record, check the delimitor , got {:?} as delimitor ", delim as char);
                return Err(anyhow!(
                    "found only one field in record, check the delimitor , got {:?} as delimitor ",
                    delim as char
                ));
            }
        } else if record.len() != nb_fields {
            log::error!("non constant number of fields at record {} first record has {}", num_record, nb_fields);
            return Err(anyhow!(
                "non constant number of fields at record {} first record has {}",
                num_record,
                nb_fields
            ));
        }
        // coordinates then label
        let mut v = Vec::<F>::with_capacity(nb_fields - 1);
        for (j, field) in record.iter().take(nb_fields - 1).enumerate() {
            match field.trim().parse::<F>() {
                Ok(val) => v.push(val),
                Err(_) => {
                    log::error!("error decoding field {} of record  {}, field : {:?}", j, num_record, field);
                    return Err(anyhow!("error decoding field {} of record  {}, field : {:?}", j, num_record, field));
                }
            }
        }
        let field = record.get(nb_fields - 1).unwrap_or("");
        let label = field
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow!("error decoding label of record {}, field : {:?}", num_record, field))?;
        points.push(v);
        labels.push(label);
    }
    log::info!("get_labelled_points read {} points", points.len());
    Ok((points, labels))
} // end of get_labelled_points

/// get labelled points from a csv file.
/// Each line of the file must have a vector of float values and an integer label with some standard csv delimiters.
/// A header is possible with lines beginning with '#' or '%'
pub fn get_labelled_points_from_csv<F>(filepath: &Path, delim: u8) -> anyhow::Result<(Vec<Vec<F>>, Vec<i64>)>
where
    F: FromStr + Float,
{
    let fileres = OpenOptions::new().read(true).open(filepath);
    let file = match fileres {
        Ok(file) => file,
        Err(e) => {
            log::error!("get_labelled_points_from_csv could not open file {:?}", filepath.as_os_str());
            return Err(anyhow!("get_labelled_points_from_csv could not open file {} : {}", filepath.display(), e));
        }
    };
    get_labelled_points(file, delim)
} // end of get_labelled_points_from_csv

//========================================================================================

// end of mod tests
