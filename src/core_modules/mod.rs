pub mod color;
pub mod entity;
pub mod expansion;
pub mod grouping;
pub mod union_find;
pub mod zoom_controller;
