//! A multi-channel scan addressed by channel label.

use mesh_heightfield::{Axis, HeightGrid};

use crate::channel::Channel;
use crate::error::{ConformalError, ConformalResult};

/// All channels of one scan, sharing the same axes.
///
/// # Example
///
/// ```
/// use mesh_conformal::{Image, Operation};
/// use mesh_heightfield::Axis;
/// use nalgebra::DMatrix;
///
/// let x = Axis::linspace("x", 0.0, 1.0, 3).unwrap();
/// let y = Axis::linspace("y", 0.0, 1.0, 2).unwrap();
/// let mut image = Image::new(
///     x,
///     y,
///     vec![DMatrix::from_element(3, 2, 7.0), DMatrix::zeros(3, 2)],
///     vec!["Height".to_string(), "Phase".to_string()],
/// )
/// .unwrap();
///
/// image.channel_mut("Height").unwrap().apply(Operation::MinToZero).unwrap();
/// assert_eq!(image.channel("Height").unwrap().data()[(0, 0)], 0.0);
/// assert!(image.channel("Amplitude").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    x: Axis,
    y: Axis,
    channels: Vec<Channel>,
    labels: Vec<String>,
}

impl Image {
    /// Wrap raw channel grids with their labels.
    ///
    /// Channel `k` gets index `k` and label `labels[k]`.
    ///
    /// # Errors
    ///
    /// - invalid dimension if the counts differ or a grid does not match the
    ///   axes
    /// - invalid parameter if a label repeats
    pub fn new(
        x: Axis,
        y: Axis,
        channels: Vec<HeightGrid>,
        labels: Vec<String>,
    ) -> ConformalResult<Self> {
        if channels.len() != labels.len() {
            return Err(ConformalError::invalid_dimension(format!(
                "{} channels but {} labels",
                channels.len(),
                labels.len()
            )));
        }
        for (k, label) in labels.iter().enumerate() {
            if labels[..k].contains(label) {
                return Err(ConformalError::invalid_parameter(format!(
                    "duplicate channel label `{label}`"
                )));
            }
        }

        let channels = channels
            .into_iter()
            .enumerate()
            .map(|(index, data)| Channel::new(index, x.clone(), y.clone(), data))
            .collect::<ConformalResult<Vec<_>>>()?;

        Ok(Self {
            x,
            y,
            channels,
            labels,
        })
    }

    /// Shared x axis.
    #[must_use]
    pub const fn x(&self) -> &Axis {
        &self.x
    }

    /// Shared y axis.
    #[must_use]
    pub const fn y(&self) -> &Axis {
        &self.y
    }

    /// Channel labels in index order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the scan has no channels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channels in index order.
    pub fn channels(&self) -> impl Iterator<Item = (&str, &Channel)> {
        self.labels.iter().map(String::as_str).zip(&self.channels)
    }

    fn position(&self, label: &str) -> ConformalResult<usize> {
        self.labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| ConformalError::unknown_channel(label))
    }

    /// Channel with `label`.
    ///
    /// # Errors
    ///
    /// Returns [`ConformalError::UnknownChannel`] if no channel has `label`.
    pub fn channel(&self, label: &str) -> ConformalResult<&Channel> {
        let k = self.position(label)?;
        Ok(&self.channels[k])
    }

    /// Mutable channel with `label`.
    ///
    /// # Errors
    ///
    /// Returns [`ConformalError::UnknownChannel`] if no channel has `label`.
    pub fn channel_mut(&mut self, label: &str) -> ConformalResult<&mut Channel> {
        let k = self.position(label)?;
        Ok(&mut self.channels[k])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn axes() -> (Axis, Axis) {
        (
            Axis::linspace("x", 0.0, 1.0, 3).unwrap(),
            Axis::linspace("y", 0.0, 1.0, 2).unwrap(),
        )
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn lookup_by_label() {
        let (x, y) = axes();
        let image = Image::new(
            x,
            y,
            vec![DMatrix::zeros(3, 2), DMatrix::from_element(3, 2, 1.0)],
            labels(&["Height", "Phase"]),
        )
        .unwrap();

        assert_eq!(image.len(), 2);
        assert_eq!(image.channel("Phase").unwrap().index(), 1);
        assert_eq!(image.labels(), ["Height", "Phase"]);
        let order: Vec<&str> = image.channels().map(|(l, _)| l).collect();
        assert_eq!(order, ["Height", "Phase"]);
    }

    #[test]
    fn unknown_label_fails() {
        let (x, y) = axes();
        let mut image = Image::new(x, y, vec![DMatrix::zeros(3, 2)], labels(&["Height"])).unwrap();
        assert_eq!(
            image.channel("height").unwrap_err(),
            ConformalError::UnknownChannel("height".to_string())
        );
        assert!(image.channel_mut("Phase").is_err());
    }

    #[test]
    fn count_mismatch_fails() {
        let (x, y) = axes();
        let err = Image::new(x, y, vec![DMatrix::zeros(3, 2)], labels(&["A", "B"])).unwrap_err();
        assert!(err.is_invalid_dimension());
    }

    #[test]
    fn bad_channel_shape_fails() {
        let (x, y) = axes();
        let err = Image::new(
            x,
            y,
            vec![DMatrix::zeros(3, 2), DMatrix::zeros(2, 3)],
            labels(&["A", "B"]),
        )
        .unwrap_err();
        assert!(err.is_invalid_dimension());
    }

    #[test]
    fn duplicate_label_fails() {
        let (x, y) = axes();
        let err = Image::new(
            x,
            y,
            vec![DMatrix::zeros(3, 2), DMatrix::zeros(3, 2)],
            labels(&["A", "A"]),
        )
        .unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn empty_image() {
        let (x, y) = axes();
        let image = Image::new(x, y, Vec::new(), Vec::new()).unwrap();
        assert!(image.is_empty());
    }
}
