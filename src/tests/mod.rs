mod tree;
mod vectors;
