use crate::types::{AngularSample, VisionReading};

/// Provides the most recent vision report.
///
/// Implementations typically wrap a value that is updated asynchronously by the vision
/// pipeline; the filter only ever reads it.
pub trait VisionSource<T> {
    /// Gets the latest reading, or `None` if the sensor has not produced a valid reading
    /// yet or is currently unavailable.
    fn latest(&self) -> Option<VisionReading<T>>;
}

/// Provides the current heading of the platform.
pub trait HeadingSource<T> {
    /// Reads the heading sensor. The reading is assumed to be taken at the time of the call.
    fn read(&self) -> AngularSample<T>;
}

impl<T, S> VisionSource<T> for &S
where
    S: VisionSource<T> + ?Sized,
{
    #[inline]
    fn latest(&self) -> Option<VisionReading<T>> {
        (**self).latest()
    }
}

impl<T, S> HeadingSource<T> for &S
where
    S: HeadingSource<T> + ?Sized,
{
    #[inline]
    fn read(&self) -> AngularSample<T> {
        (**self).read()
    }
}

impl<T> VisionSource<T> for core::cell::Cell<Option<VisionReading<T>>>
where
    T: Copy,
{
    #[inline]
    fn latest(&self) -> Option<VisionReading<T>> {
        self.get()
    }
}

impl<T> HeadingSource<T> for core::cell::Cell<AngularSample<T>>
where
    T: Copy,
{
    #[inline]
    fn read(&self) -> AngularSample<T> {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    fn read_through<V: VisionSource<f32>>(source: V) -> Option<VisionReading<f32>> {
        source.latest()
    }

    #[test]
    fn test_cells_as_sources() {
        let vision: Cell<Option<VisionReading<f32>>> = Cell::new(None);
        let heading = Cell::new(AngularSample::new(0.5_f32, 0.0));

        assert_eq!(read_through(&vision), None);

        vision.set(Some(VisionReading::new(0.1, 2.0)));
        assert_eq!(read_through(&vision), Some(VisionReading::new(0.1, 2.0)));

        heading.set(AngularSample::new(0.75, 0.1));
        assert_eq!((&heading).read(), AngularSample::new(0.75, 0.1));
    }
}
