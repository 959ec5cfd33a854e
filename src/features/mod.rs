pub mod fileserver;
