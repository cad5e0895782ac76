//! Utility modules for deck-tools
//!
//! This module contains helpers shared by the jobs, organized by functionality:
//! - `files`: Image listing and directory management
//! - `images`: Cropping, resizing, saving and probing images
//! - `http`: HTTP client utilities
//! - `table`: Positional CSV reading and writing

pub mod files;
pub mod http;
pub mod images;
pub mod table;
