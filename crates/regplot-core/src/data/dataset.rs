use csv::Writer;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Paired samples, `x[i]` belongs to `y[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
}

impl Dataset {
    /// Returns `None` if the columns differ in length.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Option<Self> {
        if x.len() != y.len() {
            return None;
        }
        Some(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }
    pub fn y(&self) -> &[f64] {
        &self.y
    }
    pub fn len(&self) -> usize {
        self.x.len()
    }
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn write_csv<P: AsRef<Path>>(
        &self,
        path: P,
        predictions: Option<&[f64]>,
    ) -> Result<(), csv::Error> {
        self.check_predictions(predictions)?;
        self.write_csv_to(File::create(path)?, predictions)
    }

    /// Writes `x,y` rows, plus a `prediction` column when predictions are given.
    pub fn write_csv_to<W: Write>(
        &self,
        writer: W,
        predictions: Option<&[f64]>,
    ) -> Result<(), csv::Error> {
        self.check_predictions(predictions)?;
        let mut wtr = Writer::from_writer(writer);

        match predictions {
            Some(_) => wtr.write_record(["x", "y", "prediction"])?,
            None => wtr.write_record(["x", "y"])?,
        }

        for (i, (x, y)) in self.x.iter().zip(&self.y).enumerate() {
            match predictions.and_then(|p| p.get(i)) {
                Some(pred) => wtr.write_record(&[x.to_string(), y.to_string(), pred.to_string()])?,
                None => wtr.write_record(&[x.to_string(), y.to_string()])?,
            }
        }

        wtr.flush()?;
        Ok(())
    }

    fn check_predictions(&self, predictions: Option<&[f64]>) -> Result<(), csv::Error> {
        match predictions {
            Some(p) if p.len() != self.len() => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} predictions for {} samples", p.len(), self.len()),
            )
            .into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_columns() {
        assert!(Dataset::new(vec![0., 1.], vec![0.]).is_none());
        let data = Dataset::new(vec![0., 1.], vec![2., 3.]).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.y(), &[2., 3.]);
    }

    #[test]
    fn test_csv_with_predictions() {
        let data = Dataset::new(vec![0., 1.], vec![0.5, 2.]).unwrap();
        let mut buf = Vec::new();
        data.write_csv_to(&mut buf, Some(&[0.25, 1.75][..])).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "x,y,prediction\n0,0.5,0.25\n1,2,1.75\n");
    }

    #[test]
    fn test_csv_rejects_short_predictions() {
        let data = Dataset::new(vec![0., 1., 2.], vec![0., 2., 4.]).unwrap();
        let mut buf = Vec::new();

        assert!(data.write_csv_to(&mut buf, Some(&[0.][..])).is_err());
        assert!(buf.is_empty());

        let path = std::env::temp_dir()
            .join(format!("regplot-{}-short-predictions.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);
        assert!(data.write_csv(&path, Some(&[0., 1.][..])).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_csv_without_predictions() {
        let data = Dataset::new(vec![0., 1.], vec![0., 2.]).unwrap();
        let mut buf = Vec::new();
        data.write_csv_to(&mut buf, None).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "x,y\n0,0\n1,2\n");
    }
}
