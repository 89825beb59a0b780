//! Text labels summarizing the earliest and latest decadal predictions.

use boreas_io::ExceedanceType;
use boreas_trend::DecadalPrediction;

use crate::error::ChartError;
use crate::spec::Placement;

/// A text label at a fixed position in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Year-axis coordinate.
    pub x: f64,
    /// Count-axis coordinate.
    pub y: f64,
    /// Label text.
    pub text: String,
    /// Series the label describes.
    pub series: ExceedanceType,
}

/// `"~N per year"`, with `N` rounded half away from zero.
pub fn format_count(predicted: f64) -> String {
    format!("~{} per year", predicted.round() as i64)
}

/// Labels for the first and last of `predictions` that belong to `series`.
///
/// # Errors
///
/// [`ChartError::MissingPrediction`] if no prediction matches `series`.
pub fn annotate(
    series: ExceedanceType,
    predictions: &[DecadalPrediction],
    placement: &Placement,
) -> Result<[Annotation; 2], ChartError> {
    let mut own = predictions.iter().filter(|p| p.series == series);
    let first = own.next().ok_or(ChartError::MissingPrediction { series })?;
    let last = own.last().unwrap_or(first);

    let label = |p: &DecadalPrediction, (x, y): (f64, f64)| Annotation {
        x,
        y,
        text: format_count(p.predicted_count),
        series,
    };
    Ok([label(first, placement.early), label(last, placement.late)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExceedanceType::*;

    fn prediction(year: i32, series: ExceedanceType, predicted_count: f64) -> DecadalPrediction {
        DecadalPrediction {
            year,
            series,
            predicted_count,
        }
    }

    #[test]
    fn format_rounds_half_away_from_zero() {
        assert_eq!(format_count(12.6), "~13 per year");
        assert_eq!(format_count(12.5), "~13 per year");
        assert_eq!(format_count(12.49), "~12 per year");
        assert_eq!(format_count(0.3), "~0 per year");
    }

    #[test]
    fn uses_earliest_and_latest_prediction() {
        let predictions: Vec<_> = (0..8)
            .map(|i| prediction(1945 + 10 * i, Dx90, 10.0 + f64::from(i) * 2.2))
            .collect();
        let placement = Placement::new((1942.0, 75.0), (1992.0, 75.0));

        let [early, late] = annotate(Dx90, &predictions, &placement).unwrap();

        assert_eq!(early.text, "~10 per year");
        assert_eq!((early.x, early.y), (1942.0, 75.0));
        assert_eq!(late.text, "~25 per year");
        assert_eq!((late.x, late.y), (1992.0, 75.0));
        assert_eq!(late.series, Dx90);
    }

    #[test]
    fn ignores_other_series() {
        let predictions = vec![
            prediction(1945, Dt32, 120.0),
            prediction(1945, Dt00, 14.4),
            prediction(2015, Dt00, 6.5),
            prediction(2015, Dt32, 90.0),
        ];
        let placement = Placement::new((1942.0, 40.0), (1992.0, 40.0));

        let [early, late] = annotate(Dt00, &predictions, &placement).unwrap();

        assert_eq!(early.text, "~14 per year");
        assert_eq!(late.text, "~7 per year");
    }

    #[test]
    fn no_predictions_is_an_error() {
        let placement = Placement::new((0.0, 0.0), (1.0, 1.0));
        assert!(matches!(
            annotate(Dp2x, &[], &placement),
            Err(ChartError::MissingPrediction { series: Dp2x })
        ));
    }
}
