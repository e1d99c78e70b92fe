//! Measurement report.
//!
//! An [EvaluationReport] gathers named measurement groups, each holding named measures with their
//! declared range. The dbcv evaluator records its score under
//! "Internal Clustering Evaluation" / "Distance-based Evaluation".

use std::fmt;

/// A scalar measure with the range it lives in.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// best possible value
    pub best: f64,
    pub lower_is_better: bool,
}

impl Measurement {
    pub fn new(name: &str, value: f64, min: f64, max: f64, best: f64, lower_is_better: bool) -> Self {
        Measurement {
            name: String::from(name),
            value,
            min,
            max,
            best,
            lower_is_better,
        }
    }
}

/// A named list of measures
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementGroup {
    pub name: String,
    measures: Vec<Measurement>,
}

impl MeasurementGroup {
    fn new(name: &str) -> Self {
        MeasurementGroup {
            name: String::from(name),
            measures: Vec::new(),
        }
    }

    /// adds a measure, replacing a previous measure of the same name
    pub fn add_measure(&mut self, measure: Measurement) {
        match self.measures.iter_mut().find(|m| m.name == measure.name) {
            Some(old) => *old = measure,
            None => self.measures.push(measure),
        }
    }

    pub fn get_measure(&self, name: &str) -> Option<&Measurement> {
        self.measures.iter().find(|m| m.name == name)
    }

    pub fn get_measures(&self) -> &[Measurement] {
        &self.measures
    }
} // end of impl MeasurementGroup

/// A report of evaluation results.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationReport {
    pub name: String,
    pub short_name: String,
    groups: Vec<MeasurementGroup>,
}

impl EvaluationReport {
    pub fn new(name: &str, short_name: &str) -> Self {
        EvaluationReport {
            name: String::from(name),
            short_name: String::from(short_name),
            groups: Vec::new(),
        }
    }

    /// returns the group with given name, creating it if needed
    pub fn find_or_create_group(&mut self, name: &str) -> &mut MeasurementGroup {
        let pos = match self.groups.iter().position(|g| g.name == name) {
            Some(pos) => pos,
            None => {
                self.groups.push(MeasurementGroup::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[pos]
    }

    pub fn get_group(&self, name: &str) -> Option<&MeasurementGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn get_groups(&self) -> &[MeasurementGroup] {
        &self.groups
    }
} // end of impl EvaluationReport

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for group in &self.groups {
            writeln!(f, "  {}", group.name)?;
            for m in &group.measures {
                writeln!(f, "    {} : {:.6} (range [{}, {}])", m.name, m.value, m.min, m.max)?;
            }
        }
        Ok(())
    }
}
