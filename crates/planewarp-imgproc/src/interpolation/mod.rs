mod bilinear;

pub(crate) use bilinear::bilinear_interpolation;
