pub mod labubu_sea;
