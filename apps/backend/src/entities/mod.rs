pub mod labubu;
