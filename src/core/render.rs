//! Rendering seam between the session and whatever displays the bubbles.

use crate::core::message::{Speaker, Turn};

/// A display target for conversation bubbles.
///
/// The session only ever appends bubbles or wipes them all, so this is the
/// whole surface a frontend has to provide.
pub trait Renderer {
    fn render_turn(&mut self, speaker: Speaker, text: &str);

    fn clear(&mut self);

    fn render(&mut self, turn: &Turn) {
        self.render_turn(turn.speaker, &turn.text);
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render_turn(&mut self, speaker: Speaker, text: &str) {
        (**self).render_turn(speaker, text);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
