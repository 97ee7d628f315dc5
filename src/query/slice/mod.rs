mod slice_trimesh;
