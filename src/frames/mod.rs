pub mod feature_frame;
