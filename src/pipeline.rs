use crate::types::{Frame, HandObservation};
use anyhow::Result;

/// Turns a camera frame into at most one tracked hand.
pub trait HandPipeline {
    fn name(&self) -> String;
    fn process(&mut self, frame: &Frame) -> Result<Option<HandObservation>>;
}

impl<T: HandPipeline + ?Sized> HandPipeline for Box<T> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn process(&mut self, frame: &Frame) -> Result<Option<HandObservation>> {
        (**self).process(frame)
    }
}
