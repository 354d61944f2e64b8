//! # UI Module
//!
//! This module contains all UI components for the Guitar Master application.

pub mod circle_view;
pub mod feedback;
pub mod fretboard_view;
pub mod main_display;
