quantity!(Hours, "h");
quantity!(Minutes, "min");
