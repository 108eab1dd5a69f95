quantity!(CubicMetersPerHour, "m³/h");
