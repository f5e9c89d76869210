// sift: toxicity classification service
//
// This is the library root. The scorer module holds both scoring paths
// (ONNX model and keyword fallback); web exposes them over HTTP.

pub mod config;
pub mod output;
pub mod scorer;
pub mod sentiment;
pub mod web;
